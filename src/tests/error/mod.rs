mod config_error_tests;
