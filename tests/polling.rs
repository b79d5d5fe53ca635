use std::time::Duration;

use challenge_bot::{Dispatcher, Error, Store, TelegramApi, bot, render};
use mockito::Matcher;
use serde_json::json;

async fn new_poller(server: &mockito::ServerGuard) -> (TelegramApi, Dispatcher) {
    let api = TelegramApi::new("TOKEN", &server.url()).expect("client");
    let store = Store::connect_in_memory().await.expect("in-memory store");
    (api, Dispatcher::new(store, Duration::ZERO))
}

#[tokio::test]
async fn six_straight_polling_failures_stop_the_loop() {
    let mut server = mockito::Server::new_async().await;
    let polls = server
        .mock("POST", "/botTOKEN/getUpdates")
        .with_status(500)
        .with_body(
            json!({
                "ok": false,
                "error_code": 500,
                "description": "Internal Server Error"
            })
            .to_string(),
        )
        .expect(6)
        .create_async()
        .await;

    let (api, dispatcher) = new_poller(&server).await;
    let err = bot::run_with_backoff(&api, &dispatcher, Duration::ZERO, Duration::ZERO)
        .await
        .unwrap_err();

    polls.assert_async().await;
    assert!(matches!(err, Error::Telegram { code: 500, .. }));
}

#[tokio::test]
async fn a_failed_reply_notifies_the_user_and_polling_continues() {
    let mut server = mockito::Server::new_async().await;

    // One press arrives on the first poll.
    let first_poll = server
        .mock("POST", "/botTOKEN/getUpdates")
        .match_body(Matcher::PartialJson(json!({ "offset": 0 })))
        .with_body(
            json!({
                "ok": true,
                "result": [{
                    "update_id": 1,
                    "message": {
                        "chat": { "id": 42 },
                        "from": { "id": 7, "first_name": "Anna" },
                        "text": "/start"
                    }
                }]
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    // The greeting is the only send with a keyboard; reject it.
    let rejected_greeting = server
        .mock("POST", "/botTOKEN/sendMessage")
        .match_body(Matcher::PartialJson(
            json!({ "reply_markup": { "resize_keyboard": true } }),
        ))
        .with_status(400)
        .with_body(
            json!({
                "ok": false,
                "error_code": 400,
                "description": "Bad Request: message is too long"
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let failure_notice = server
        .mock("POST", "/botTOKEN/sendMessage")
        .match_body(Matcher::Json(
            json!({ "chat_id": 42, "text": render::GENERIC_FAILURE }),
        ))
        .with_body(json!({ "ok": true, "result": { "message_id": 9 } }).to_string())
        .expect(1)
        .create_async()
        .await;

    // Polling resumes past the consumed update until the conflicts add up.
    let later_polls = server
        .mock("POST", "/botTOKEN/getUpdates")
        .match_body(Matcher::PartialJson(json!({ "offset": 2 })))
        .with_status(409)
        .with_body(
            json!({
                "ok": false,
                "error_code": 409,
                "description": "Conflict: terminated by other getUpdates request"
            })
            .to_string(),
        )
        .expect(6)
        .create_async()
        .await;

    let (api, dispatcher) = new_poller(&server).await;
    let err = bot::run_with_backoff(&api, &dispatcher, Duration::ZERO, Duration::ZERO)
        .await
        .unwrap_err();

    first_poll.assert_async().await;
    rejected_greeting.assert_async().await;
    failure_notice.assert_async().await;
    later_polls.assert_async().await;
    assert!(matches!(err, Error::Conflict));
}
