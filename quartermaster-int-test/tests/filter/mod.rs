mod evaluation_test;
mod saved_filter_test;
