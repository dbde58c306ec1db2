/// Paths reachable without a credential.
///
/// A final segment containing `*` also spans nested segments, so `/**.js`
/// covers every script under the root.
pub const PUBLIC_ENDPOINTS: &[&str] = &[
    "/",
    "/login",
    "/api/auth",
    "/**.js",
    "/**.css",
    "/**.json",
    "/img/**",
    "/ico/**",
];
