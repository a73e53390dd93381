use chrono::NaiveDate;
use flexiplan_core::api::client::FlexiplanClient;
use flexiplan_core::api::models::{ActivityKind, FriendRequestAction, TaskFormData};
use flexiplan_core::core::services::routine_service::RoutineService;
use flexiplan_core::core::week::WeekCursor;
use flexiplan_core::storage::credentials::{CredentialBundle, MemoryCredentialStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "Bearer fresh-access";

async fn setup() -> (MockServer, FlexiplanClient) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/refresh-token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access": "fresh-access"})))
        .mount(&server)
        .await;

    let bundle = CredentialBundle {
        access_token: "stale".to_string(),
        refresh_token: "refresh-1".to_string(),
        user_id: 7,
        username: "alice".to_string(),
    };
    let store = Arc::new(MemoryCredentialStore::with_bundle(&bundle).unwrap());
    let client = FlexiplanClient::new(server.uri(), store).unwrap();
    (server, client)
}

fn task_json(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "task_name": name,
        "description": null,
        "time_required": "00:45:00",
        "days_associated": ["Monday", "Wednesday"],
        "priority": "High",
        "created_at": "2024-10-01T09:00:00Z",
        "is_fixed_time": false,
        "fixed_time_slot": null,
        "user": 7,
        "routine": null
    })
}

fn task_form() -> TaskFormData {
    TaskFormData {
        task_name: "Study".to_string(),
        description: Some("Chapter 4".to_string()),
        time_required: Some("00:45:00".to_string()),
        days_associated: vec!["Monday".to_string(), "Wednesday".to_string()],
        priority: "High".to_string(),
        is_fixed_time: false,
        fixed_time_slot: None,
    }
}

#[tokio::test]
async fn test_user_hobby_lifecycle() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/7/hobbies/"))
        .and(header("Authorization", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 3, "name": "Chess", "category": "Games"}
        ])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/7/hobbies/"))
        .and(body_json(json!({"hobby_id": 3})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"message": "Hobby added successfully."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/user/7/hobbies/delete/3/"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let hobbies = client.fetch_user_hobbies(7).await.unwrap();
    assert_eq!(hobbies[0].name, "Chess");

    let ack = client.add_user_hobby(7, 3).await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Hobby added successfully."));

    client.delete_user_hobby(7, 3).await.unwrap();
}

#[tokio::test]
async fn test_task_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/users/7/tasks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([task_json(1, "Study")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/users/7/tasks/"))
        .and(body_json(json!({
            "task_name": "Study",
            "description": "Chapter 4",
            "time_required": "00:45:00",
            "days_associated": ["Monday", "Wednesday"],
            "priority": "High",
            "is_fixed_time": false,
            "fixed_time_slot": null
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(task_json(2, "Study")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/users/7/update-task/2/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task_json(2, "Study")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/users/7/tasks/2/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Task deleted successfully."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tasks = client.fetch_user_tasks(7).await.unwrap();
    assert_eq!(tasks[0].days_associated, vec!["Monday", "Wednesday"]);

    let created = client.add_user_task(7, &task_form()).await.unwrap();
    assert_eq!(created.id, 2);

    let updated = client.update_user_task(7, 2, &task_form()).await.unwrap();
    assert_eq!(updated.priority, "High");

    client.delete_user_task(7, 2).await.unwrap();
}

#[tokio::test]
async fn test_friend_endpoints() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/friends/list/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 12, "username": "bob", "first_name": "Bob", "last_name": "Stone", "profile_picture": null}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/friends/respond/40/"))
        .and(body_json(json!({"action": "Accept"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Friend request accepted."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/friends/send/12/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 41,
            "user": 7,
            "friend": 12,
            "sender_username": "alice",
            "status": "Pending",
            "created_at": "2024-10-16T08:00:00Z",
            "first_name": "Alice",
            "last_name": "Liddell",
            "profile_picture": null
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/friends/remove/12/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"message": "Friend removed successfully."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/friends/12/routine/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "friend_id": 12,
            "friend_username": "bob",
            "friend_name": "Bob Stone",
            "profile_picture": null,
            "routine_data": {
                "Monday": [{"type": "work", "activity": "Office", "start_time": "09:00", "end_time": "17:00"}]
            }
        })))
        .mount(&server)
        .await;

    let friends = client.fetch_friends().await.unwrap();
    assert_eq!(friends[0].name, "bob");

    let ack = client
        .respond_to_friend_request(40, FriendRequestAction::Accept)
        .await
        .unwrap();
    assert_eq!(ack.message.as_deref(), Some("Friend request accepted."));

    let pending = client.send_friend_request(12).await.unwrap();
    assert_eq!(pending.id, 41);

    client.remove_friend(12).await.unwrap();

    let routine = client.fetch_friend_routine(12).await.unwrap();
    assert_eq!(routine.routine_data["Monday"][0].activity, "Office");
}

#[tokio::test]
async fn test_direct_messages() {
    let (server, client) = setup().await;
    let message = json!({
        "id": 5,
        "sender": {"id": 7, "username": "alice", "email": "a@example.com", "first_name": "Alice", "last_name": "L", "profile_picture": null},
        "receiver": {"id": 12, "username": "bob", "email": "b@example.com", "first_name": "Bob", "last_name": "S", "profile_picture": null},
        "message": "Gym at 6?",
        "timestamp": "2024-10-16T17:00:00Z",
        "is_read": false
    });

    Mock::given(method("GET"))
        .and(path("/api/messages/12/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([message.clone()])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/messages/12/send/"))
        .and(body_json(json!({"message": "Gym at 6?"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(message))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/messages/12/mark-read/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "messages marked as read", "messages_updated": 3})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let messages = client.fetch_messages(12).await.unwrap();
    assert_eq!(messages[0].receiver.username, "bob");

    let sent = client.send_message(12, "Gym at 6?").await.unwrap();
    assert_eq!(sent.sender.id, 7);

    let read = client.mark_messages_as_read(12).await.unwrap();
    assert_eq!(read.messages_updated, 3);
}

#[tokio::test]
async fn test_agent_chat() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/agent/chat/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "messages": [
                {"content": "Plan my week", "is_user": true, "created_at": "2024-10-16T08:00:00Z"},
                {"content": "Sure", "is_user": false, "created_at": "2024-10-16T08:00:02Z"}
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/agent/chat/"))
        .and(body_json(json!({"message": "More gym"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Added."})))
        .expect(1)
        .mount(&server)
        .await;

    let history = client.fetch_agent_messages().await.unwrap();
    assert_eq!(history.len(), 2);
    assert!(history[0].is_user);

    let reply = client.send_agent_message("More gym").await.unwrap();
    assert_eq!(reply, "Added.");
}

#[tokio::test]
async fn test_routine_generation_accepts_both_shapes() {
    let (server, client) = setup().await;
    let day = json!({"Monday": [{"type": "task", "activity": "Study", "start_time": "10:00", "end_time": "11:00"}]});

    Mock::given(method("POST"))
        .and(path("/api/generate-routine/7/"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"routine": day.clone()})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/generate-routine/7/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"routine_data": day})))
        .expect(1)
        .mount(&server)
        .await;

    let generated = client.generate_routine(7).await.unwrap();
    assert_eq!(generated["Monday"][0].activity, "Study");

    let updated = client.update_routine(7).await.unwrap();
    assert_eq!(updated["Monday"].len(), 1);
}

#[tokio::test]
async fn test_routine_mutations() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/routine/mark-completed/"))
        .and(body_json(json!({
            "day": "Monday",
            "activity_name": "Office",
            "activity_type": "hobby",
            "is_completed": true
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "is_completed": true,
            "activity": "Office",
            "day": "Monday"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/routine/remove-activity/"))
        .and(body_json(json!({
            "day": "Monday",
            "activity_name": "Office",
            "activity_type": "work"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "message": "work 'Office' removed from Monday",
            "remaining_activities": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/routine/analytics/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "completion_analytics": {"completion_rate": 0.5},
            "consistency_score": 71
        })))
        .mount(&server)
        .await;

    let marked = client
        .mark_activity_completed("Monday", "Office", ActivityKind::Hobby, true)
        .await
        .unwrap();
    assert!(marked.is_completed);

    let removed = client
        .remove_activity_from_routine("Monday", "Office", "work")
        .await
        .unwrap();
    assert_eq!(removed.status.as_deref(), Some("success"));

    let analytics = client.fetch_routine_analytics().await.unwrap();
    assert_eq!(analytics.consistency_score, json!(71));
    assert_eq!(analytics.time_balance, serde_json::Value::Null);
}

#[tokio::test]
async fn test_routine_service_toggles_named_activity() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user-routine/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "routine_data": {
                "Wednesday": [
                    {"type": "work", "activity": "Office", "start_time": "09:00", "end_time": "17:00", "is_completed": true},
                    {"type": "task", "activity": "Laundry", "start_time": "18:00", "end_time": "18:30"}
                ]
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/routine/mark-completed/"))
        .and(body_json(json!({
            "day": "Wednesday",
            "activity_name": "Office",
            "activity_type": "hobby",
            "is_completed": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "is_completed": false,
            "activity": "Office",
            "day": "Wednesday"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = RoutineService::new(client);
    let cursor = WeekCursor::new(NaiveDate::from_ymd_opt(2024, 10, 16).unwrap());

    let plan = service.day_plan(&cursor).await.unwrap();
    assert_eq!(plan.activities.len(), 2);
    assert_eq!(plan.completed_count(), 1);

    let result = service.toggle_completion(&cursor, "office").await.unwrap();
    assert!(!result.is_completed);

    assert!(service.toggle_completion(&cursor, "Gym").await.is_err());
}

#[tokio::test]
async fn test_user_routine_missing_is_not_found() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/user-routine/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "No primary routine found"})),
        )
        .mount(&server)
        .await;

    let err = client.fetch_user_routine().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.message(), "No primary routine found");
}
