use oncoscope_cli::render;
use oncoscope_client::error::ClientError;
use oncoscope_core::error::ValidationError;
use oncoscope_core::field::FieldSchema;
use oncoscope_core::form::FormState;
use oncoscope_core::models::chat::ChatMessage;
use oncoscope_core::models::prediction::Prediction;
use oncoscope_session::error::SessionError;

#[test]
fn fields_show_values_labels_and_examples() {
    let mut form = FormState::with_schema(FieldSchema::from_names(["worst radius", "custom"]).unwrap());
    form.set_value("worst_radius", Some(16.1)).unwrap();

    let out = render::fields(&form);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "Pior (worst)");
    assert!(lines[1].contains("worst_radius"));
    assert!(lines[1].contains("16.1"));
    assert!(lines[1].contains("(ex: "));
    assert!(lines[2].contains("custom"));
    assert!(lines[2].contains('-'));
    assert!(!lines[2].contains("(ex: "));
}

#[test]
fn fields_before_schema_loads() {
    assert_eq!(render::fields(&FormState::new()), "schema not loaded yet");
}

#[test]
fn prediction_shows_percentage() {
    assert_eq!(
        render::prediction(&Prediction::new("Maligno", 0.93)),
        "diagnosis: Maligno (93.0% confidence)"
    );
}

#[test]
fn history_labels_speakers() {
    let out = render::history(&[ChatMessage::assistant("Olá"), ChatMessage::user("oi")]);
    let lines: Vec<&str> = out.lines().collect();
    assert!(lines[0].ends_with("assistant: Olá"));
    assert!(lines[1].ends_with("you: oi"));
    assert_eq!(render::history(&[]), "no conversation yet");
}

#[test]
fn each_error_kind_gets_its_own_tag() {
    let chat = SessionError::Chat(ClientError::Status {
        status: 503,
        detail: "offline".to_string(),
    });
    let prediction = SessionError::Prediction(ClientError::Transport("refused".to_string()));
    let validation = SessionError::from(ValidationError::UnknownField("x".to_string()));

    assert!(render::error(&chat).starts_with("[chat unavailable]"));
    assert!(render::error(&chat).contains("offline"));
    assert!(render::error(&prediction).starts_with("[prediction failed]"));
    assert!(render::error(&validation).starts_with("[invalid input]"));
}
