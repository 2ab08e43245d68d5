use clap::Parser;
use hearth::config::{Cli, FileConfig, Limits, ServerConfig};

#[test]
fn test_cli_defaults() {
    let cli = Cli::try_parse_from(["hearth"]).unwrap();

    assert_eq!(cli.root.to_str(), Some("."));
    assert_eq!(cli.port, 8080);
    assert!(!cli.daemon);
    assert!(cli.config.is_none());
}

#[test]
fn test_cli_short_and_long_flags() {
    let cli = Cli::try_parse_from(["hearth", "-r", "/srv", "-p", "80", "-d"]).unwrap();
    assert_eq!(cli.root.to_str(), Some("/srv"));
    assert_eq!(cli.port, 80);
    assert!(cli.daemon);

    let cli = Cli::try_parse_from(["hearth", "--root", "/www", "--port", "65535", "--daemon"])
        .unwrap();
    assert_eq!(cli.root.to_str(), Some("/www"));
    assert_eq!(cli.port, 65535);
    assert!(cli.daemon);
}

#[test]
fn test_cli_rejects_bad_ports() {
    for port in ["0", "65536", "-1", "http"] {
        assert!(
            Cli::try_parse_from(["hearth", "--port", port]).is_err(),
            "port {port} should be rejected"
        );
    }
}

#[test]
fn test_cli_rejects_unknown_option() {
    let err = Cli::try_parse_from(["hearth", "--bogus"]).unwrap_err();
    assert!(err.use_stderr());
}

#[test]
fn test_cli_help_is_not_an_error_stream() {
    let err = Cli::try_parse_from(["hearth", "-h"]).unwrap_err();
    assert!(!err.use_stderr());
}

#[test]
fn test_server_config_requires_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    std::fs::write(&file, b"x").unwrap();

    let missing = Cli::try_parse_from(["hearth", "-r", "/definitely/not/here"]).unwrap();
    assert!(ServerConfig::from_cli(missing).is_err());

    let not_dir = Cli::try_parse_from(["hearth", "-r", file.to_str().unwrap()]).unwrap();
    assert!(ServerConfig::from_cli(not_dir).is_err());

    let ok = Cli::try_parse_from(["hearth", "-r", dir.path().to_str().unwrap()]).unwrap();
    let cfg = ServerConfig::from_cli(ok).unwrap();
    assert_eq!(cfg.root, dir.path());
    assert_eq!(cfg.interpreter, "php");
    assert_eq!(cfg.limits, Limits::default());
}

#[test]
fn test_default_limits() {
    let limits = Limits::default();

    assert_eq!(limits.read_buffer, 8191);
    assert_eq!(limits.max_method_len, 15);
    assert_eq!(limits.max_path_len, 4095);
    assert_eq!(limits.max_version_len, 15);
}

#[test]
fn test_yaml_overrides_are_partial() {
    let file = FileConfig::from_yaml(
        "interpreter: /usr/bin/php-cgi\nlimits:\n  max_headers: 10\n  max_script_output: 1024\n",
    )
    .unwrap();

    assert_eq!(file.interpreter.as_deref(), Some("/usr/bin/php-cgi"));
    assert_eq!(file.limits.max_headers, 10);
    assert_eq!(file.limits.max_script_output, 1024);
    assert_eq!(file.limits.read_buffer, 8191);
}

#[test]
fn test_yaml_unknown_key_rejected() {
    assert!(FileConfig::from_yaml("port: 80\n").is_err());
}

#[test]
fn test_cli_interpreter_wins_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("hearth.yaml");
    std::fs::write(&config_path, "interpreter: from-file\nlimits:\n  read_buffer: 1024\n").unwrap();

    let cli = Cli::try_parse_from([
        "hearth",
        "-r",
        dir.path().to_str().unwrap(),
        "-c",
        config_path.to_str().unwrap(),
        "--interpreter",
        "from-cli",
    ])
    .unwrap();
    let cfg = ServerConfig::from_cli(cli).unwrap();

    assert_eq!(cfg.interpreter, "from-cli");
    assert_eq!(cfg.limits.read_buffer, 1024);
}
