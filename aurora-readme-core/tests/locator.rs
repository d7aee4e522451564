use aurora_readme_core::locator::locate;

#[test]
fn bare_owner_repo_splits_at_first_slash() {
    let identity = locate("vercel/next.js").unwrap();
    assert_eq!(identity.owner, "vercel");
    assert_eq!(identity.repo, "next.js");

    let identity = locate("rust-lang/rust").unwrap();
    assert_eq!(identity.owner, "rust-lang");
    assert_eq!(identity.repo, "rust");

    let identity = locate("a1-b2/c_d.e-f").unwrap();
    assert_eq!(identity.owner, "a1-b2");
    assert_eq!(identity.repo, "c_d.e-f");
}

#[test]
fn owner_grammar_is_stricter_than_repo_grammar() {
    // Underscores and dots are repo-only characters.
    assert!(locate("own_er/repo").is_err());
    assert!(locate("own.er/repo").is_err());
    assert!(locate("owner/re po").is_err());
}

#[test]
fn github_urls_yield_first_two_path_segments() {
    let identity = locate("https://github.com/rust-lang/cargo").unwrap();
    assert_eq!(identity.owner, "rust-lang");
    assert_eq!(identity.repo, "cargo");

    // Trailing segments and slashes are ignored.
    let identity = locate("https://github.com/rust-lang/cargo/tree/master/src").unwrap();
    assert_eq!(identity.owner, "rust-lang");
    assert_eq!(identity.repo, "cargo");

    let identity = locate("https://github.com/rust-lang/cargo/").unwrap();
    assert_eq!(identity.repo, "cargo");
}

#[test]
fn scheme_is_optional_and_http_is_accepted() {
    let identity = locate("github.com/acme/widget").unwrap();
    assert_eq!(identity.owner, "acme");
    assert_eq!(identity.repo, "widget");

    let identity = locate("http://github.com/acme/widget").unwrap();
    assert_eq!(identity.owner, "acme");
}

#[test]
fn host_must_be_exactly_github_dot_com() {
    assert!(locate("https://gitlab.com/acme/widget").is_err());
    assert!(locate("https://www.github.com/acme/widget").is_err());
    assert!(locate("https://github.com.evil.example/acme/widget").is_err());
}

#[test]
fn urls_with_fewer_than_two_segments_are_rejected() {
    assert!(locate("https://github.com/acme").is_err());
    assert!(locate("https://github.com/").is_err());
    assert!(locate("https://github.com").is_err());
}

#[test]
fn garbage_is_rejected() {
    assert!(locate("").is_err());
    assert!(locate("not a repository").is_err());
    assert!(locate("acme/widget/extra").is_err());
    assert!(locate("/leading/slash").is_err());

    let err = locate("no repo here!").unwrap_err();
    assert!(err.to_string().contains("invalid repository locator"));
}
