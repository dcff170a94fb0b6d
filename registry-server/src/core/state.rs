use std::sync::Arc;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::db::store::EmployeeStore;
use crate::db::store::surreal::SurrealStore;
use crate::registry::RegistryService;
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 使用 Arc 实现浅拷贝，每个请求处理函数拿到的都是同一组服务。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | store | 员工存储网关 |
/// | registry | 注册表引擎 |
/// | jwt_service | JWT 认证服务 |
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub store: Arc<dyn EmployeeStore>,
    pub registry: RegistryService,
    jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// 初始化服务器状态 - 打开数据库并装配服务
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.db_path()).await?;
        Ok(Self::assemble(config, db))
    }

    /// 用内存数据库装配状态 (测试)
    pub async fn initialize_in_memory(config: &Config) -> Result<Self, AppError> {
        let db = DbService::in_memory().await?;
        Ok(Self::assemble(config, db))
    }

    fn assemble(config: &Config, db: DbService) -> Self {
        let store: Arc<dyn EmployeeStore> = Arc::new(SurrealStore::new(db.db));
        let registry = RegistryService::new(store.clone());
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self {
            config: Arc::new(config.clone()),
            store,
            registry,
            jwt_service,
        }
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}
