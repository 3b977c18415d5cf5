use oncoscope_cli::commands::Command;
use oncoscope_cli::error::CommandError;

#[test]
fn set_splits_key_from_value() {
    assert_eq!(
        Command::parse("set worst_radius 16,1").unwrap(),
        Command::Set {
            key: "worst_radius".to_string(),
            value: "16,1".to_string(),
        }
    );
}

#[test]
fn set_without_value_is_rejected() {
    assert_eq!(
        Command::parse("set worst_radius"),
        Err(CommandError::MissingArgument {
            command: "set",
            argument: "a key and a value",
        })
    );
    assert!(Command::parse("unset").is_err());
}

#[test]
fn say_keeps_the_whole_message() {
    assert_eq!(
        Command::parse("say  o que significa   isso? ").unwrap(),
        Command::Say("o que significa   isso?".to_string())
    );
    assert_eq!(Command::parse("say").unwrap(), Command::Say(String::new()));
}

#[test]
fn words_are_case_insensitive_and_have_aliases() {
    assert_eq!(Command::parse("SUBMIT").unwrap(), Command::Submit);
    assert_eq!(Command::parse("q").unwrap(), Command::Quit);
    assert_eq!(Command::parse("exit").unwrap(), Command::Quit);
    assert_eq!(Command::parse("?").unwrap(), Command::Help);
    assert_eq!(Command::parse("   ").unwrap(), Command::Empty);
}

#[test]
fn unknown_word_is_reported() {
    assert_eq!(
        Command::parse("predict now"),
        Err(CommandError::Unknown("predict".to_string()))
    );
}

#[test]
fn typed_keys_are_normalised_like_schema_keys() {
    assert_eq!(
        Command::parse("set Worst_Radius 16").unwrap(),
        Command::Set {
            key: "worst_radius".to_string(),
            value: "16".to_string(),
        }
    );
    assert_eq!(
        Command::parse("unset  Worst   Texture ").unwrap(),
        Command::Unset {
            key: "worst_texture".to_string(),
        }
    );
}
