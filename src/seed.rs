// ABOUTME: Fixed seed data installed at bootstrap
// ABOUTME: Default roles, system accounts, log categories and parameter types

use crate::access::RoleName;

pub const ADMINISTRATOR_LOGIN: &str = "administrator";
pub const DEFAULT_ADMINISTRATOR_PASSWORD: &str = "admin";
pub const DEFAULT_ADMINISTRATOR_EMAIL: &str = "admin@sciproj";

pub const SERVICE_ACCOUNT_LOGIN: &str = "bot";

pub struct RoleSeed {
    pub role: RoleName,
    pub description: &'static str,
}

pub const DEFAULT_ROLES: &[RoleSeed] = &[
    RoleSeed {
        role: RoleName::Administrator,
        description: "Storage administrator with full access",
    },
    RoleSeed {
        role: RoleName::User,
        description: "Regular user",
    },
    RoleSeed {
        role: RoleName::System,
        description: "Internal system account",
    },
    RoleSeed {
        role: RoleName::Bot,
        description: "Non-interactive automation account",
    },
];

pub struct AccountSeed {
    pub login: &'static str,
    pub name_first: &'static str,
    pub name_last: &'static str,
    pub email: &'static str,
    pub roles: &'static [RoleName],
}

pub const SYSTEM_ACCOUNTS: &[AccountSeed] = &[AccountSeed {
    login: SERVICE_ACCOUNT_LOGIN,
    name_first: "Service",
    name_last: "Bot",
    email: "bot@sciproj",
    roles: &[RoleName::System, RoleName::Bot],
}];

pub const ADMINISTRATOR_ROLES: &[RoleName] = &[RoleName::Administrator, RoleName::User];

pub const INFORMATION: &str = "Information";
pub const WARNING: &str = "Warning";
pub const ERROR: &str = "Error";
pub const DEBUG: &str = "Debug";

pub const DEFAULT_LOG_CATEGORIES: &[(&str, &str)] = &[
    (INFORMATION, "Routine events such as sign-in and record creation"),
    (WARNING, "Unexpected but recoverable conditions"),
    (ERROR, "Failed operations"),
    (DEBUG, "Diagnostic details"),
];

pub const NUMERIC_VALUE: &str = "Numeric value";
pub const NUMERIC_RANGE: &str = "Numeric range";
pub const STRING_VALUE: &str = "String value";
pub const BOOLEAN_VALUE: &str = "Boolean value";
pub const GENERIC: &str = "Generic";

pub const DEFAULT_PARAMETER_TYPES: &[(&str, &str)] = &[
    (NUMERIC_VALUE, "Single floating point value"),
    (NUMERIC_RANGE, "Closed interval of floating point values"),
    (STRING_VALUE, "Free-form text"),
    (BOOLEAN_VALUE, "True or false flag"),
    (GENERIC, "Parameter without a specific value shape"),
];
