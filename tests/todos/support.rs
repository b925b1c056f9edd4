use serde_json::{json, Value};
use teams_todo::{
    handlers, Identity, InMemoryTodoStore, Service, TodoRequest, TodoResponse,
};

pub fn ada() -> Identity {
    Identity::new("U1", "Ada")
}

pub fn grace() -> Identity {
    Identity::new("U2", "Grace")
}

pub fn build_service() -> Service<InMemoryTodoStore> {
    handlers::todo_service(InMemoryTodoStore::new())
}

pub fn create(
    service: &Service<InMemoryTodoStore>,
    caller: &Identity,
    description: &str,
    channel: &str,
) -> Value {
    let resp = service.dispatch_request(
        &TodoRequest::new("POST").with_body(json!({
            "description": description,
            "isCompleted": false,
            "channelOrChatId": channel,
        })),
        caller,
    );
    assert_eq!(resp.status, 200, "create failed: {}", resp.body);
    resp.body
}

pub fn list(service: &Service<InMemoryTodoStore>, caller: &Identity, channel: &str) -> Vec<Value> {
    let resp: TodoResponse = service.dispatch_request(&TodoRequest::get(channel), caller);
    assert_eq!(resp.status, 200, "list failed: {}", resp.body);
    resp.body.as_array().cloned().unwrap_or_default()
}
