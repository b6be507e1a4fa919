mod limit_tests;
mod strict_tests;
