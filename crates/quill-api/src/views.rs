//! Static HTML views for the activation endpoint, which always renders one
//! of these two pages and never returns an error status.

pub const ACTIVATION_SUCCESS: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"utf-8\">
    <title>Account verified</title>
</head>
<body>
    <h1>Account verified</h1>
    <p>Your email address has been verified. You can now log in.</p>
</body>
</html>
";

pub const ACTIVATION_FAILURE: &str = "<!DOCTYPE html>
<html lang=\"en\">
<head>
    <meta charset=\"utf-8\">
    <title>Verification failed</title>
</head>
<body>
    <h1>Verification failed</h1>
    <p>We were unable to verify this account. The link may be invalid or the
    account may already be verified.</p>
</body>
</html>
";
