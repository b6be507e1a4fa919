mod memory_tests;
mod sink_tests;
