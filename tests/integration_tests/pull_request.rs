use crate::common::{TestRepo, stderr, stdout};

fn on_branch(remote_url: &str) -> TestRepo {
    let repo = TestRepo::new();
    repo.git(&["remote", "add", "origin", remote_url]);
    repo.git(&["checkout", "--quiet", "-b", "feature/x"]);
    repo
}

#[test]
fn test_github_pull_request_opens_compare_page() {
    let repo = on_branch("git@github.com:acme/widgets.git");

    let output = repo
        .vc_command(&["pr"])
        .env("VC_OPEN_COMMAND", "echo opened {url}")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(
        stdout(&output)
            .contains("opened https://github.com/acme/widgets/compare/feature/x?expand=1")
    );
}

#[test]
fn test_bitbucket_pull_request_opens_new_page() {
    let repo = on_branch("https://user@bitbucket.org/acme/widgets.git");

    let output = repo
        .vc_command(&["pull-request"])
        .env("VC_OPEN_COMMAND", "echo {url}")
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", stderr(&output));
    assert!(
        stdout(&output)
            .contains("https://bitbucket.org/acme/widgets/pull-requests/new?source=feature%2Fx")
    );
}

#[test]
fn test_unsupported_host_is_reported() {
    let repo = on_branch("https://gitlab.com/acme/widgets.git");

    let output = repo
        .vc_command(&["pr"])
        .env("VC_OPEN_COMMAND", "echo opened {url}")
        .output()
        .unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("only supported for GitHub and Bitbucket"));
    assert!(!out.contains("opened"));
}
