use provenance_portal::gate::{Disposition, GateConfig, RouteClass, canonicalize, classify, decide};

fn config() -> GateConfig {
    GateConfig::default()
}

// --- Classification ---

#[test]
fn unlisted_paths_classify_as_public() {
    let config = config();
    for path in ["/", "/legal/privacy", "/legal/terms", "/pricing", "/api/waitlist"] {
        assert_eq!(classify(&config, path), RouteClass::Public, "path {path}");
    }
}

#[test]
fn auth_only_paths_are_exact_matches() {
    let config = config();
    assert_eq!(classify(&config, "/login"), RouteClass::AuthOnly);
    assert_eq!(classify(&config, "/signup"), RouteClass::AuthOnly);
    // Sub-paths of an auth-only entry are not auth-only themselves.
    assert_eq!(classify(&config, "/login/help"), RouteClass::Public);
}

#[test]
fn protected_prefix_covers_the_whole_subtree() {
    let config = config();
    assert_eq!(classify(&config, "/dashboard"), RouteClass::Protected);
    assert_eq!(classify(&config, "/dashboard/settings"), RouteClass::Protected);
    assert_eq!(classify(&config, "/api/dashboard/summary"), RouteClass::Protected);
}

#[test]
fn protected_prefix_takes_precedence_over_auth_only_exact_match() {
    // The lists are expected to be disjoint by configuration; precedence is
    // still pinned so an overlap cannot produce an ambiguous classification.
    let mut config = config();
    config.auth_only_paths.insert("/dashboard".to_string());
    assert_eq!(classify(&config, "/dashboard"), RouteClass::Protected);
}

#[test]
fn trailing_slash_variants_classify_alike() {
    let config = config();
    assert_eq!(classify(&config, "/login/"), RouteClass::AuthOnly);
    assert_eq!(classify(&config, "/dashboard/"), RouteClass::Protected);
    assert_eq!(classify(&config, "//"), RouteClass::Public);
}

// --- Decision table ---

#[test]
fn public_paths_allow_for_both_session_states() {
    let config = config();
    for path in ["/", "/legal/privacy", "/pricing", "/api/waitlist"] {
        for authenticated in [false, true] {
            assert_eq!(
                decide(&config, authenticated, path),
                Disposition::Allow,
                "path {path}, authenticated {authenticated}"
            );
        }
    }
}

#[test]
fn anonymous_protected_requests_redirect_to_login() {
    let config = config();
    for path in ["/dashboard", "/dashboard/settings", "/dashboard/reports/42"] {
        assert_eq!(
            decide(&config, false, path),
            Disposition::Redirect("/login".to_string()),
            "path {path}"
        );
    }
}

#[test]
fn authenticated_auth_only_requests_redirect_to_dashboard() {
    let config = config();
    assert_eq!(
        decide(&config, true, "/login"),
        Disposition::Redirect("/dashboard".to_string())
    );
    assert_eq!(
        decide(&config, true, "/signup"),
        Disposition::Redirect("/dashboard".to_string())
    );
}

#[test]
fn authenticated_protected_requests_allow() {
    let config = config();
    assert_eq!(decide(&config, true, "/dashboard"), Disposition::Allow);
    assert_eq!(decide(&config, true, "/dashboard/settings"), Disposition::Allow);
}

#[test]
fn anonymous_auth_only_requests_allow() {
    let config = config();
    assert_eq!(decide(&config, false, "/login"), Disposition::Allow);
    assert_eq!(decide(&config, false, "/signup"), Disposition::Allow);
}

#[test]
fn decisions_are_idempotent() {
    // Same (path, authenticated) pair, same disposition, every time. The gate
    // holds no state that could drift between evaluations.
    let config = config();
    for _ in 0..50 {
        assert_eq!(
            decide(&config, false, "/dashboard"),
            Disposition::Redirect("/login".to_string())
        );
        assert_eq!(decide(&config, true, "/dashboard"), Disposition::Allow);
    }
}

// --- Loop guard ---

#[test]
fn loop_guard_degrades_to_allow_when_target_equals_path() {
    // A configuration that puts the login target inside the protected zone
    // would otherwise redirect /login to itself forever.
    let config = GateConfig {
        protected_path_prefixes: vec!["/login".to_string()],
        login_redirect: "/login".to_string(),
        ..GateConfig::default()
    };
    assert_eq!(decide(&config, false, "/login"), Disposition::Allow);
}

#[test]
fn loop_guard_compares_canonicalized_paths() {
    let config = GateConfig {
        protected_path_prefixes: vec!["/login".to_string()],
        login_redirect: "/login".to_string(),
        ..GateConfig::default()
    };
    // Trailing slash and query-string variants of the target must also be
    // recognized as the same destination.
    assert_eq!(decide(&config, false, "/login/"), Disposition::Allow);
    assert_eq!(decide(&config, false, "/login?next=%2Fdashboard"), Disposition::Allow);
}

#[test]
fn loop_guard_does_not_suppress_distinct_targets() {
    let config = config();
    assert_eq!(
        decide(&config, false, "/dashboard"),
        Disposition::Redirect("/login".to_string())
    );
}

// --- Canonicalization ---

#[test]
fn canonicalize_trims_trailing_slashes_and_query_strings() {
    assert_eq!(canonicalize("/dashboard/"), "/dashboard");
    assert_eq!(canonicalize("/dashboard?tab=scans"), "/dashboard");
    assert_eq!(canonicalize("/dashboard/?tab=scans"), "/dashboard");
    assert_eq!(canonicalize("/"), "/");
    assert_eq!(canonicalize("//"), "/");
    assert_eq!(canonicalize("/?q=1"), "/");
}
