use async_trait::async_trait;
use chatfront::session::main_loop::{main_loop, ChatView, LoopExit};
use chatfront::ui::bubble::View;
use chatfront::ui::welcome::SUGGESTIONS;
use chatfront::{ChatReply, ConversationStore, Responder, ResponderError};
use reqwest::StatusCode;
use std::io::Cursor;
use std::sync::Mutex;

const BASE: &str = "http://localhost:8000";

/// Answers with a canned markdown reply, failing on messages containing "falla".
#[derive(Default)]
struct Canned {
    asked: Mutex<Vec<String>>,
}

#[async_trait]
impl Responder for Canned {
    async fn reply(&self, message: &str) -> Result<ChatReply, ResponderError> {
        self.asked.lock().unwrap().push(message.to_string());
        if message.contains("falla") {
            return Err(ResponderError::Status(StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(ChatReply {
            response: format!("**Respuesta** a {message}"),
            conversation_id: None,
            sources: None,
        })
    }
}

fn chat(show_welcome: bool) -> ChatView {
    ChatView {
        view: View {
            styled: false,
            width: 60,
        },
        show_welcome,
    }
}

async fn run(script: &str, show_welcome: bool) -> (LoopExit, ConversationStore, Vec<String>, String) {
    run_bytes(script.as_bytes(), show_welcome).await
}

async fn run_bytes(
    script: &[u8],
    show_welcome: bool,
) -> (LoopExit, ConversationStore, Vec<String>, String) {
    let responder = Canned::default();
    let mut store = ConversationStore::new(BASE);
    let mut input = Cursor::new(script.to_vec());
    let mut out = Vec::new();

    let exit = main_loop(&responder, &mut store, &chat(show_welcome), &mut input, &mut out)
        .await
        .unwrap();

    let asked = responder.asked.lock().unwrap().clone();
    (exit, store, asked, String::from_utf8(out).unwrap())
}

#[tokio::test]
async fn exchange_renders_both_bubbles() {
    let (exit, store, asked, out) = run("hola\n/exit\n", true).await;

    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(asked, vec!["hola".to_string()]);
    assert_eq!(store.messages().len(), 2);
    assert!(out.contains("Bienvenido a SostenibiliChat"));
    assert!(out.contains("Tú ●"));
    assert!(out.contains("● Asistente Escribiendo..."));
    assert!(out.contains("● Asistente\nRespuesta a hola"));
}

#[tokio::test]
async fn blank_lines_send_nothing() {
    let (_, store, asked, _) = run("\n   \n\t\n", false).await;

    assert!(store.is_empty());
    assert!(asked.is_empty());
}

#[tokio::test]
async fn failure_shows_fallback_and_loop_continues() {
    let (_, store, asked, out) = run("esto falla\notra\n", false).await;

    assert_eq!(asked.len(), 2);
    let texts: Vec<&str> = store.messages().iter().map(|m| m.text.as_str()).collect();
    assert_eq!(texts[1], store.fallback_text());
    assert_eq!(texts[3], "**Respuesta** a otra");
    assert!(out.contains("Lo siento, ocurrió un error"));
    assert!(!store.awaiting_response());
}

#[tokio::test]
async fn suggestion_sends_its_description() {
    let (_, store, asked, _) = run("/sugerir 3\n/sugerir 9\n", false).await;

    assert_eq!(asked, vec![SUGGESTIONS[2].description.to_string()]);
    assert_eq!(store.messages()[0].text, SUGGESTIONS[2].description);
}

#[tokio::test]
async fn invalid_utf8_line_is_skipped() {
    let mut script = b"hola\n".to_vec();
    script.extend_from_slice(&[0xff, 0xfe, b'\n']);
    script.extend_from_slice(b"adios\n");

    let (exit, store, asked, out) = run_bytes(&script, false).await;

    assert_eq!(exit, LoopExit::Quit);
    assert_eq!(asked, vec!["hola".to_string(), "adios".to_string()]);
    assert_eq!(store.messages().len(), 4);
    assert!(out.contains("Entrada no válida"));
}

#[tokio::test]
async fn logout_leaves_the_view() {
    let (exit, _, asked, out) = run("/salir\nnunca enviado\n", false).await;

    assert_eq!(exit, LoopExit::Logout);
    assert!(asked.is_empty());
    assert!(out.contains("Sesión cerrada."));
}

#[tokio::test]
async fn unknown_command_prints_help() {
    let (_, store, _, out) = run("/borrar\n", false).await;

    assert!(store.is_empty());
    assert!(out.contains("Comando desconocido: /borrar"));
    assert!(out.contains("/sugerir <n>"));
    assert!(!out.contains("Bienvenido"));
}
