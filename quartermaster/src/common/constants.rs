// field path constants
pub const FIELD_SEPARATOR: &str = ".";

// filter constants
pub const AND_TOKEN: &str = "AND";
pub const OR_TOKEN: &str = "OR";
pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

// pagination constants
pub const DEFAULT_PAGE_SIZE: usize = 10;

// event constants
pub const STORE_EVENT: &str = "quartermaster_store_event";
