use std::fmt;

#[derive(Debug, Clone)]
pub enum ClickgenError {
    Config(String),
    Validation(String),
    Sampling(String),
    FileOperation(String),
    NotFound(String),
    Serialization(String),
    DateParse(String),
}

impl ClickgenError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClickgenError::Config(_) => "E001",
            ClickgenError::Validation(_) => "E002",
            ClickgenError::Sampling(_) => "E003",
            ClickgenError::FileOperation(_) => "E004",
            ClickgenError::NotFound(_) => "E005",
            ClickgenError::Serialization(_) => "E006",
            ClickgenError::DateParse(_) => "E007",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClickgenError::Config(_) => "Configuration Error",
            ClickgenError::Validation(_) => "Validation Error",
            ClickgenError::Sampling(_) => "Sampling Error",
            ClickgenError::FileOperation(_) => "File Operation Error",
            ClickgenError::NotFound(_) => "File Not Found",
            ClickgenError::Serialization(_) => "Serialization Error",
            ClickgenError::DateParse(_) => "Date Parse Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ClickgenError::Config(msg)
            | ClickgenError::Validation(msg)
            | ClickgenError::Sampling(msg)
            | ClickgenError::FileOperation(msg)
            | ClickgenError::NotFound(msg)
            | ClickgenError::Serialization(msg)
            | ClickgenError::DateParse(msg) => msg,
        }
    }

    /// 格式化为彩色输出（终端）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（日志）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClickgenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClickgenError {}

// 便捷的构造函数
impl ClickgenError {
    pub fn config<T: Into<String>>(msg: T) -> Self {
        ClickgenError::Config(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ClickgenError::Validation(msg.into())
    }

    pub fn sampling<T: Into<String>>(msg: T) -> Self {
        ClickgenError::Sampling(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ClickgenError::FileOperation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ClickgenError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ClickgenError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        ClickgenError::DateParse(msg.into())
    }
}

// 为常见的错误类型实现 From trait
impl From<std::io::Error> for ClickgenError {
    fn from(err: std::io::Error) -> Self {
        ClickgenError::FileOperation(err.to_string())
    }
}

impl From<csv::Error> for ClickgenError {
    fn from(err: csv::Error) -> Self {
        ClickgenError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for ClickgenError {
    fn from(err: serde_json::Error) -> Self {
        ClickgenError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for ClickgenError {
    fn from(err: chrono::ParseError) -> Self {
        ClickgenError::DateParse(err.to_string())
    }
}

impl From<config::ConfigError> for ClickgenError {
    fn from(err: config::ConfigError) -> Self {
        ClickgenError::Config(err.to_string())
    }
}

impl From<rand::distr::weighted::Error> for ClickgenError {
    fn from(err: rand::distr::weighted::Error) -> Self {
        ClickgenError::Sampling(format!("invalid weights: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, ClickgenError>;
