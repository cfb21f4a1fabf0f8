use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console_core::flows::add_dialect::AddDialectWizard;
use console_core::flows::add_group::{load_user_stores, CreateGroupWizard, GroupBasics};
use console_core::flows::dialects::{fetch_dialects, SORT_BY_DIALECT_URI};
use console_core::flows::external_claims::{ExternalClaimsScreen, SORT_BY_CLAIM_URI};
use console_core::flows::SubmitOutcome;
use console_core::{
    ConsoleContext, ListPresenter, Navigator, RestResourceClient, StaticTranslator,
    TracingNotifier,
};
use shared::domain::{DialectId, PRIMARY_USER_STORE};
use shared::protocol::AddExternalClaim;

mod config;

#[derive(Parser, Debug)]
#[command(
    name = "claim-console",
    about = "Administer claim dialects, external claim mappings, and groups"
)]
struct Args {
    /// Management API base URL; overrides console.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register a dialect together with its initial external claim mappings.
    AddDialect {
        #[arg(long)]
        dialect_uri: String,
        /// `external-claim-uri=local-claim-uri` pair; repeatable.
        #[arg(long = "claim", value_parser = parse_claim_mapping)]
        claims: Vec<AddExternalClaim>,
    },
    /// List the external claims of a dialect.
    ListClaims {
        #[arg(long)]
        dialect_id: String,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value = SORT_BY_CLAIM_URI)]
        sort_by: String,
        #[arg(long)]
        descending: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Create a group in a user store.
    AddGroup {
        #[arg(long, default_value = PRIMARY_USER_STORE)]
        domain: String,
        #[arg(long)]
        name: String,
    },
    /// List the registered claim dialects.
    ListDialects {
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
}

fn parse_claim_mapping(raw: &str) -> Result<AddExternalClaim, String> {
    let (claim_uri, mapped_local_claim_uri) = raw
        .split_once('=')
        .ok_or_else(|| "expected external-claim-uri=local-claim-uri".to_string())?;
    if claim_uri.is_empty() || mapped_local_claim_uri.is_empty() {
        return Err("both sides of the mapping must be non-empty".to_string());
    }
    Ok(AddExternalClaim {
        claim_uri: claim_uri.to_string(),
        mapped_local_claim_uri: mapped_local_claim_uri.to_string(),
    })
}

/// Terminal stand-in for the web console's router: prints where the created
/// resource can be edited.
struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn navigate_to(&self, path: &str) {
        println!("Next: open {path}");
    }
}

fn translator() -> StaticTranslator {
    let table = [
        ("claims.dialects.wizard.steps.dialect_uri", "Dialect URI"),
        ("claims.dialects.wizard.steps.external_attribute", "External attributes"),
        ("claims.dialects.wizard.steps.summary", "Summary"),
        ("claims.dialects.notifications.add_dialect.success.message", "Attribute dialect added"),
        (
            "claims.dialects.notifications.add_dialect.success.description",
            "The attribute dialect and its mappings were added successfully.",
        ),
        ("claims.dialects.notifications.add_dialect.error", "Failed to add the attribute dialect"),
        (
            "claims.dialects.notifications.add_dialect.partial.message",
            "Some attributes could not be mapped",
        ),
        (
            "claims.dialects.notifications.add_dialect.partial.description",
            "{failed} external attribute(s) were not added; retry them from the edit screen.",
        ),
        ("claims.external.advanced_search.error", "Search returned an error"),
        ("claims.external.notifications.add_claim.success", "External attribute added"),
        ("claims.external.notifications.add_claim.error", "Failed to add the external attribute"),
        ("groups.wizard.steps.basics", "Group basics"),
        ("groups.wizard.steps.summary", "Summary"),
        ("groups.notifications.create_group.success.message", "Group created"),
        (
            "groups.notifications.create_group.success.description",
            "Group {name} was created successfully.",
        ),
        ("groups.notifications.create_group.error", "Failed to create the group"),
    ]
    .into_iter()
    .map(|(key, value)| (key.to_string(), value.to_string()))
    .collect();
    StaticTranslator::new(table)
}

fn announce_step(ctx: &ConsoleContext, index: usize, total: usize, title_key: &str) {
    println!("[{}/{}] {}", index + 1, total, ctx.translator.lookup(title_key, &[]));
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let mut settings = config::load_settings();
    if let Some(server_url) = &args.server_url {
        settings.server_url = config::normalize_server_url(server_url);
    }
    tracing::debug!(server_url = %settings.server_url, "resolved settings");

    let ctx = ConsoleContext::new(
        Arc::new(RestResourceClient::new(&settings.server_url)),
        Arc::new(TracingNotifier),
        Arc::new(translator()),
        Arc::new(TerminalNavigator),
    );

    match args.command {
        Command::AddDialect {
            dialect_uri,
            claims,
        } => run_add_dialect(&ctx, &dialect_uri, claims).await,
        Command::ListClaims {
            dialect_id,
            query,
            sort_by,
            descending,
            page,
        } => {
            run_list_claims(
                &ctx,
                &settings,
                dialect_id,
                &query,
                &sort_by,
                descending,
                page,
            )
            .await
        }
        Command::AddGroup { domain, name } => run_add_group(&ctx, domain, name).await,
        Command::ListDialects { query, page } => {
            run_list_dialects(&ctx, &settings, &query, page).await
        }
    }
}

async fn run_add_dialect(
    ctx: &ConsoleContext,
    dialect_uri: &str,
    claims: Vec<AddExternalClaim>,
) -> Result<()> {
    let mut wizard = AddDialectWizard::new();
    let total = wizard.controller().steps().len();

    announce_step(ctx, 0, total, &wizard.controller().current_step().title_key);
    wizard.submit_details(dialect_uri)?;
    announce_step(ctx, 1, total, &wizard.controller().current_step().title_key);
    wizard.submit_claims(claims)?;
    announce_step(ctx, 2, total, &wizard.controller().current_step().title_key);
    wizard.confirm_summary()?;

    match wizard.submit(ctx).await? {
        SubmitOutcome::NavigatedToEdit { resource_id } => {
            println!("Created dialect {resource_id}");
        }
        SubmitOutcome::ClosedAndRefreshed => {
            println!("Created dialect; re-run list-claims to see its mappings");
        }
    }
    Ok(())
}

async fn run_list_claims(
    ctx: &ConsoleContext,
    settings: &config::Settings,
    dialect_id: String,
    query: &str,
    sort_by: &str,
    descending: bool,
    page: usize,
) -> Result<()> {
    let mut screen = ExternalClaimsScreen::new(DialectId::new(dialect_id), Vec::new());
    screen.refresh(ctx).await?;
    screen.set_page_size(settings.page_size);
    screen.set_sort(sort_by, !descending);
    if !query.is_empty() {
        screen.search(ctx, query);
    }
    screen.set_page(page);

    let view = screen.page();
    println!(
        "{} claims, page {}/{}",
        view.total_count,
        view.page_number,
        view.total_pages.max(1)
    );
    for claim in &view.items {
        println!("{}  ->  {}", claim.claim_uri, claim.mapped_local_claim_uri);
    }
    Ok(())
}

async fn run_list_dialects(
    ctx: &ConsoleContext,
    settings: &config::Settings,
    query: &str,
    page: usize,
) -> Result<()> {
    let dialects = fetch_dialects(ctx).await?;

    let mut presenter = ListPresenter::new(SORT_BY_DIALECT_URI);
    presenter.set_page_size(settings.page_size);
    presenter.set_query(query);
    presenter.set_page(page);

    let (view, _) = presenter.visible_page(&dialects);
    println!(
        "{} dialects, page {}/{}",
        view.total_count,
        view.page_number,
        view.total_pages.max(1)
    );
    for dialect in &view.items {
        println!("{}  ({})", dialect.dialect_uri, dialect.id);
    }
    Ok(())
}

async fn run_add_group(ctx: &ConsoleContext, domain: String, name: String) -> Result<()> {
    let user_stores = load_user_stores(ctx).await;
    let mut wizard = CreateGroupWizard::new(user_stores);

    let total = wizard.controller().steps().len();
    let basics = GroupBasics {
        domain,
        group_name: name,
    };
    announce_step(ctx, 0, total, &wizard.controller().current_step().title_key);
    wizard.submit_basics(ctx, basics).await?;
    announce_step(ctx, 1, total, &wizard.controller().current_step().title_key);
    wizard.confirm_summary()?;

    match wizard.submit(ctx).await? {
        SubmitOutcome::NavigatedToEdit { resource_id } => {
            println!("Created group {resource_id}");
        }
        SubmitOutcome::ClosedAndRefreshed => {
            println!("Created group");
        }
    }
    Ok(())
}
