/// The viewer is static; it has no interactions of its own.
#[derive(Debug, Clone)]
pub enum Message {}
