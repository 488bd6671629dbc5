use contentpro::{
    ai::{MockImageClient, MockTextClient},
    models::{ContactInfo, ContentType, GenerationResult, ImagePayload, InteractionState, LengthTier},
    session::{self, Session, SessionServices},
    storage::MemoryContactStore,
};

fn make_session(
    text: MockTextClient,
    image: MockImageClient,
    store: MemoryContactStore,
) -> Session {
    Session::with_services(SessionServices {
        text: Box::new(text),
        image: Box::new(image),
        store: Box::new(store),
    })
}

#[tokio::test]
async fn test_full_text_workflow_with_mocks() {
    let text = MockTextClient::new()
        .with_response("First draft about street food".to_string())
        .with_response("Shorter draft about street food".to_string());
    let mut session = make_session(
        text.clone(),
        MockImageClient::new(),
        MemoryContactStore::new(),
    );

    session.generate_text("Yangon street food").await;
    assert_eq!(
        session.current_text(),
        Some("First draft about street food")
    );

    session.refine("make it shorter").await;
    assert_eq!(
        session.current_text(),
        Some("Shorter draft about street food")
    );
    assert_eq!(session.state(), InteractionState::Idle);
    assert_eq!(session.alert(), None);
    assert_eq!(text.get_call_count(), 2);

    let prompts = text.prompts();
    assert!(prompts[0].contains("\"Yangon street food\""));
    assert!(prompts[1].contains("\"make it shorter\""));
    assert!(prompts[1].contains("First draft about street food"));
}

#[tokio::test]
async fn test_prompt_carries_selections_and_contact() {
    let text = MockTextClient::new();
    let store = MemoryContactStore::new();
    let mut session = make_session(text.clone(), MockImageClient::new(), store.clone());

    session.set_phone("09-555-0100");
    session.set_content_type(ContentType::BlogPost);
    session.set_length(LengthTier::Long);
    assert_eq!(session.content_type(), ContentType::BlogPost);
    assert_eq!(session.length(), LengthTier::Long);

    session.generate_text("bakery opening").await;

    let prompt = text.last_prompt().unwrap();
    assert!(prompt.contains("Blog Post"));
    assert!(prompt.contains("Long"));
    assert!(prompt.contains("SEO keywords"));
    assert!(prompt.contains("Phone Number: 09-555-0100"));

    // The phone change was written through before generation ran.
    assert_eq!(store.get_save_count(), 1);
    assert_eq!(store.contact().phone, "09-555-0100");
}

#[tokio::test]
async fn test_image_workflow_produces_data_uri() {
    let image = MockImageClient::new()
        .with_payload(ImagePayload::from_base64_png("aGVsbG8="));
    let mut session = make_session(
        MockTextClient::new(),
        image.clone(),
        MemoryContactStore::new(),
    );

    session.generate_image("a pagoda at dawn").await;

    assert_eq!(session.state(), InteractionState::Idle);
    assert_eq!(session.alert(), None);
    assert_eq!(image.last_prompt().as_deref(), Some("a pagoda at dawn"));

    let payload = session
        .result()
        .and_then(|r| r.as_image())
        .expect("expected an image result");
    assert_eq!(
        payload.as_data_uri(),
        Some("data:image/png;base64,aGVsbG8=")
    );
}

#[tokio::test]
async fn test_image_soft_failure_yields_placeholder_and_alert() {
    let image = MockImageClient::new().with_placeholder();
    let mut session = make_session(
        MockTextClient::new(),
        image,
        MemoryContactStore::new(),
    );

    session.generate_image("a pagoda at dawn").await;

    assert_eq!(session.state(), InteractionState::Idle);
    assert_eq!(session.alert(), Some(session::IMAGE_FAILED_ALERT));
    assert_eq!(
        session.result(),
        Some(&GenerationResult::Image(ImagePayload::Placeholder))
    );
}

#[tokio::test]
async fn test_validation_gates_before_any_request() {
    let text = MockTextClient::new();
    let image = MockImageClient::new();
    let mut session = make_session(text.clone(), image.clone(), MemoryContactStore::new());

    session.generate_text("   ").await;
    assert_eq!(session.alert(), Some(session::TEXT_TOPIC_REQUIRED));

    session.generate_image("").await;
    assert_eq!(session.alert(), Some(session::IMAGE_TOPIC_REQUIRED));

    session.refine("make it pop").await;
    assert_eq!(session.alert(), Some(session::REFINE_REQUIREMENTS));

    assert_eq!(text.get_call_count(), 0);
    assert_eq!(image.get_call_count(), 0);
    assert!(session.result().is_none());
    assert_eq!(session.state(), InteractionState::Idle);
}

#[tokio::test]
async fn test_refine_with_empty_instruction_keeps_existing_text() {
    let text = MockTextClient::new().with_response("original copy".to_string());
    let mut session = make_session(
        text.clone(),
        MockImageClient::new(),
        MemoryContactStore::new(),
    );

    session.generate_text("a topic").await;
    session.refine("   ").await;

    assert_eq!(session.alert(), Some(session::REFINE_REQUIREMENTS));
    assert_eq!(session.current_text(), Some("original copy"));
    assert_eq!(session.state(), InteractionState::Idle);
    assert_eq!(text.get_call_count(), 1);
}

#[tokio::test]
async fn test_contact_persists_across_sessions() {
    let store = MemoryContactStore::new();

    {
        let mut session = make_session(
            MockTextClient::new(),
            MockImageClient::new(),
            store.clone(),
        );
        session.set_phone("09-555-0100");
        session.set_address("12 Strand Road");
    }

    let session = make_session(
        MockTextClient::new(),
        MockImageClient::new(),
        store.clone(),
    );

    assert_eq!(
        session.contact(),
        &ContactInfo {
            phone: "09-555-0100".to_string(),
            email: String::new(),
            address: "12 Strand Road".to_string(),
        }
    );
}

#[tokio::test]
async fn test_session_recovers_after_failed_generation() {
    let text = MockTextClient::new()
        .with_failure(500)
        .with_response("recovered".to_string());
    let mut session = make_session(
        text,
        MockImageClient::new(),
        MemoryContactStore::new(),
    );

    session.generate_text("a topic").await;
    assert_eq!(
        session.result(),
        Some(&GenerationResult::Failed(
            session::GENERATION_ERROR.to_string()
        ))
    );
    assert_eq!(session.state(), InteractionState::Idle);

    session.generate_text("a topic").await;
    assert_eq!(session.current_text(), Some("recovered"));
}
