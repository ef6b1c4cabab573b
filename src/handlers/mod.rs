pub mod db_check;
pub mod upload;

pub const GREETING: &str = "Hello from CLITasker running on EC2 behind ALB!";

pub async fn home() -> &'static str {
    GREETING
}
