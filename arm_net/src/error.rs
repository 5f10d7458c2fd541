use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetError {
    #[error("http status {0} from {1}")]
    Status(u16, String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("unparseable sensor body {body:?}")]
    Parse { body: String },
    #[error("sensor reported read failure")]
    SensorFault,
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, NetError>;
