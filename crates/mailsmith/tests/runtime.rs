//! The editor runtime against a mocked template API.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use mailsmith::{
    Command, CommandState, DraftField, DraftStore, EditorRuntime, HostEffect, MemoryDocument,
    Message, Notice, TemplateEditor,
};
use mailsmith_client::ApiClient;
use mailsmith_core::{
    Language, PersistedTemplate, TemplateId, UserId, parse_document, serialize_document,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_preview(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/emails/preview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"html": "<p>preview</p>"})))
        .mount(server)
        .await;
}

fn client(server: &MockServer) -> ApiClient {
    ApiClient::new(&format!("{}/api/v1/", server.uri())).unwrap()
}

#[tokio::test]
async fn test_mount_renders_preview() {
    let server = MockServer::start().await;
    mock_preview(&server).await;

    let mut runtime = EditorRuntime::new(client(&server), DraftStore::new(Language::En));
    runtime.mount(Box::new(MemoryDocument::default()));
    assert!(runtime.has_pending_requests());

    runtime.settle().await;
    assert_eq!(runtime.editor().html(), "<p>preview</p>");
    assert!(!runtime.editor().renderer().is_loading());
}

#[tokio::test]
async fn test_save_opens_created_template() {
    let server = MockServer::start().await;
    mock_preview(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/templates"))
        .and(body_partial_json(json!({"title": "Welcome", "titleEn": "Welcome"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "template": {
                "id": 42,
                "user_id": "user-1",
                "title": "Welcome",
                "content": "{}"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut runtime = EditorRuntime::new(client(&server), DraftStore::new(Language::En));
    runtime.mount(Box::new(MemoryDocument::default()));
    runtime.dispatch(Message::SetDraftField(DraftField::Subject, "Welcome".to_string()));
    runtime.dispatch(Message::Save);
    assert_eq!(
        runtime.editor().command_state(Command::Save),
        CommandState::Pending
    );

    let host = runtime.settle().await;
    assert_eq!(host, vec![HostEffect::OpenTemplate(TemplateId::new(42))]);
    assert_eq!(runtime.editor().template_id(), Some(TemplateId::new(42)));
    assert_eq!(
        runtime.editor_mut().take_notices(),
        vec![Notice::success("Template has been saved")]
    );
}

#[tokio::test]
async fn test_japanese_update_after_switch() {
    let server = MockServer::start().await;
    mock_preview(&server).await;

    let japanese = json!({"type": "doc", "content": [{"text": "日本語"}]});
    Mock::given(method("POST"))
        .and(path("/api/v1/templates/5"))
        .and(body_partial_json(json!({
            "title": "ようこそ",
            "contentJa": serialize_document(&japanese)
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let template = PersistedTemplate {
        id: TemplateId::new(5),
        user_id: UserId::new("user-1"),
        title: "Welcome".to_string(),
        title_en: None,
        title_ja: Some("ようこそ".to_string()),
        preview_text: None,
        preview_text_en: None,
        preview_text_ja: None,
        content: r#"{"type":"doc"}"#.to_string(),
        content_en: None,
        content_ja: None,
        created_at: None,
        updated_at: None,
    };
    let mut runtime = EditorRuntime::with_editor(client(&server), |notifier| {
        TemplateEditor::edit(&template, Language::En, notifier)
    });
    runtime.mount(Box::new(MemoryDocument::default()));

    let mut widget = None;
    for effect in runtime.dispatch(Message::SwitchLanguage(Language::Ja)) {
        if let HostEffect::RemountEditor { generation, content } = effect {
            assert_eq!(generation, 1);
            let mounted = MemoryDocument::new(content);
            runtime.mount(Box::new(mounted.clone()));
            widget = Some(mounted);
        }
    }

    widget.unwrap().edit(japanese.clone());
    let host = runtime.settle().await;
    assert!(host.is_empty());
    assert_eq!(
        parse_document(&runtime.editor().drafts().draft(Language::Ja).content).unwrap(),
        japanese
    );

    runtime.dispatch(Message::Update);
    let host = runtime.settle().await;
    assert_eq!(host, vec![HostEffect::Revalidate]);
    assert_eq!(
        runtime.editor_mut().take_notices(),
        vec![Notice::success("Template has been updated")]
    );
}

#[tokio::test]
async fn test_failed_delete_keeps_template_open() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/templates/5"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "message": "Template not found",
            "errors": []
        })))
        .mount(&server)
        .await;

    let template = PersistedTemplate {
        id: TemplateId::new(5),
        user_id: UserId::new("user-1"),
        title: "Welcome".to_string(),
        title_en: None,
        title_ja: None,
        preview_text: None,
        preview_text_en: None,
        preview_text_ja: None,
        content: "{}".to_string(),
        content_en: None,
        content_ja: None,
        created_at: None,
        updated_at: None,
    };
    let mut runtime = EditorRuntime::with_editor(client(&server), |notifier| {
        TemplateEditor::edit(&template, Language::En, notifier)
    });

    runtime.dispatch(Message::Delete);
    let host = runtime.settle().await;

    assert!(host.is_empty());
    assert_eq!(runtime.editor().template_id(), Some(TemplateId::new(5)));
    assert_eq!(
        runtime.editor_mut().take_notices(),
        vec![Notice::error("Template not found")]
    );
}

#[tokio::test]
async fn test_unauthorized_test_send_reports_server_message() {
    let server = MockServer::start().await;
    mock_preview(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/emails/send"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status": 401,
            "message": "Unauthorized",
            "errors": []
        })))
        .mount(&server)
        .await;

    let mut runtime = EditorRuntime::new(client(&server), DraftStore::new(Language::En));
    runtime.mount(Box::new(MemoryDocument::default()));
    runtime.dispatch(Message::SendTest);
    runtime.settle().await;

    assert_eq!(
        runtime.editor_mut().take_notices(),
        vec![Notice::error("Unauthorized")]
    );
    assert_eq!(
        runtime.editor().command_state(Command::SendTest),
        CommandState::Idle
    );
}

#[tokio::test]
async fn test_next_returns_when_idle() {
    let server = MockServer::start().await;
    mock_preview(&server).await;

    let mut runtime = EditorRuntime::new(client(&server), DraftStore::new(Language::En));
    let idle = tokio::time::timeout(Duration::from_secs(5), runtime.next())
        .await
        .unwrap();
    assert!(idle.is_empty());

    let widget = MemoryDocument::default();
    runtime.mount(Box::new(widget.clone()));
    while runtime.has_pending_requests() {
        runtime.next().await;
    }
    assert_eq!(runtime.editor().html(), "<p>preview</p>");

    // A queued widget notification is applied without waiting.
    widget.edit(json!({"type": "doc", "content": [{"text": "queued"}]}));
    tokio::time::timeout(Duration::from_secs(5), runtime.next())
        .await
        .unwrap();
    assert!(runtime.has_pending_requests());

    runtime.settle().await;
    let idle = tokio::time::timeout(Duration::from_secs(5), runtime.next())
        .await
        .unwrap();
    assert!(idle.is_empty());
}
