//! Registry Server - 员工注册表后端
//!
//! # 架构概述
//!
//! 本模块是注册表后端的主入口，提供以下核心功能：
//!
//! - **注册表引擎** (`registry`): 过滤/排序/分页查询与集合式批量变更
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储与存储网关
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **HTTP API** (`api`): RESTful API 接口
//!
//! # 模块结构
//!
//! ```text
//! registry-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证
//! ├── registry/      # 查询与批量变更引擎
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层与存储网关
//! └── utils/         # 错误、日志、验证
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod registry;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use registry::{RegistryError, RegistryService};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - 支持 tracing 格式说明符
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// 设置运行环境 (dotenv, 日志)
///
/// 必须在加载配置和启动服务器之前调用。
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 文件是可选的
    let _ = dotenv::dotenv();

    let config = Config::from_env();
    std::fs::create_dir_all(config.log_dir())?;
    init_logger_with_file(Some(&config.log_level), Some(&config.log_dir()));

    Ok(())
}
