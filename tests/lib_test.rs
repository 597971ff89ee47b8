//! Library integration tests.

use choco_adopt::AdoptError;

#[test]
fn error_types_are_public() {
    let err = AdoptError::ToolMissing {
        tool: "Chocolatey".into(),
        hint: "Install Chocolatey from https://chocolatey.org/install".into(),
    };
    assert!(err.to_string().contains("Chocolatey"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn result_type_alias_is_public() {
    fn test_fn() -> choco_adopt::Result<()> {
        Ok(())
    }
    assert!(test_fn().is_ok());
}

#[test]
fn interrupt_has_its_own_exit_code() {
    assert_eq!(AdoptError::Interrupted.exit_code(), 130);
    assert_eq!(
        choco_adopt::error::EXIT_INTERRUPTED,
        AdoptError::Interrupted.exit_code()
    );
}

#[test]
fn cli_types_are_public() {
    use choco_adopt::cli::Cli;
    use choco_adopt::ui::OutputMode;
    use clap::Parser;

    let cli = Cli::parse_from(["choco-adopt", "--quiet"]);
    assert_eq!(cli.output_mode(), OutputMode::Quiet);
}

#[test]
fn normalization_is_shared_by_all_inventories() {
    use choco_adopt::inventory::{parse_choco_list, parse_winget_list};
    use choco_adopt::normalize::normalize_name;

    let key = normalize_name("Mozilla Firefox 118.0.1");
    assert_eq!(key, normalize_name("mozilla firefox"));

    let choco = parse_choco_list("mozilla-firefox|118.0.1\n");
    assert!(choco.contains(&key));

    let winget = parse_winget_list(
        "Name            Id               Version  Source\n\
         -------------------------------------------------\n\
         Mozilla Firefox Mozilla.Firefox  118.0.1  winget\n",
    );
    assert!(winget.contains_key(&key));
}
