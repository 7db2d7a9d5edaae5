mod catalog_test;
mod pagination_test;
