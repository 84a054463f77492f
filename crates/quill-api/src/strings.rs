//! User-facing response messages, kept in one place so handlers and tests
//! agree on the exact wording.

// Default message if we have nothing better to provide
pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error has occurred";

pub const LOGIN_FAILURE: &str =
    "Login failed. No accounts found that match the provided credentials";
pub const LOGOUT_SUCCESS: &str = "Successfully logged-out";

pub const REGISTER_EXISTING_USER: &str = "An existing user exists with this email address";
pub const REGISTER_PASSWORD_COMPLEXITY: &str = "Account passwords must be at least 8 characters in length, and contain at least: 1 lowercase letter, 1 uppercase letter, and 1 number";
pub const REGISTER_VALIDATE: &str = "This account has not been verified. Please check your email for an Account Verification email in order to verify your account";

pub const UNAUTHORISED: &str =
    "You are not authorised to make this request. Resources can only be updated by their owner";
pub const RESOURCE_NOT_FOUND: &str = "The specified resource could not be found";

pub const POST_DELETED: &str = "Post has been deleted successfully";
pub const COMMENT_DELETED: &str = "Comment has been deleted successfully";

pub fn register_success(email: &str) -> String {
    format!(
        "Successfully registered account \"{email}\". Please check your email for an Account Validation email in order to verify your account"
    )
}
