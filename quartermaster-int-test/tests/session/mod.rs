mod filter_store_test;
