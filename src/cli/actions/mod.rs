pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        sender_email: String,
        max_attempts: u32,
        code_length: usize,
        code_ttl_seconds: i64,
        delivery_timeout_seconds: u64,
        email_endpoint: Option<String>,
    },
}
