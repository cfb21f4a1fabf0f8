mod list_tests;
mod support;
