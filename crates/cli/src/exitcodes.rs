pub const SUCCESS: i32 = 0;
pub const ISSUES_FOUND: i32 = 1;
pub const FAILURE: i32 = 3;
pub const TIMEOUT: i32 = 4;
