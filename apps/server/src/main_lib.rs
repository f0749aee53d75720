use std::sync::Arc;

use budgetpal_baas::{
    ActivityRepository, BaasAuthProvider, BaasClient, BaasConfig, ExpenseRepository,
    GoalRepository, IncomeRepository,
};
use budgetpal_core::{
    admin::{ActivityRepositoryTrait, AdminService, AdminServiceTrait},
    auth::{AuthProviderTrait, AuthService, AuthServiceTrait, RolePolicy},
    dashboard::{DashboardService, DashboardServiceTrait},
    expenses::{ExpenseRepositoryTrait, ExpenseService, ExpenseServiceTrait},
    goals::{GoalRepositoryTrait, GoalService, GoalServiceTrait},
    incomes::{IncomeRepositoryTrait, IncomeService, IncomeServiceTrait},
    reports::{ReportService, ReportServiceTrait},
};
use chrono_tz::Tz;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub expense_service: Arc<dyn ExpenseServiceTrait>,
    pub income_service: Arc<dyn IncomeServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub dashboard_service: Arc<dyn DashboardServiceTrait>,
    pub report_service: Arc<dyn ReportServiceTrait>,
    pub admin_service: Arc<dyn AdminServiceTrait>,
}

/// Storage and identity implementations the services are built on.
pub struct Backends {
    pub auth_provider: Arc<dyn AuthProviderTrait>,
    pub expense_repo: Arc<dyn ExpenseRepositoryTrait>,
    pub income_repo: Arc<dyn IncomeRepositoryTrait>,
    pub goal_repo: Arc<dyn GoalRepositoryTrait>,
    pub activity_repo: Arc<dyn ActivityRepositoryTrait>,
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub fn assemble_state(backends: Backends, role_policy: RolePolicy, timezone: Tz) -> Arc<AppState> {
    let Backends {
        auth_provider,
        expense_repo,
        income_repo,
        goal_repo,
        activity_repo,
    } = backends;

    let auth_service = Arc::new(AuthService::new(auth_provider, role_policy));
    let expense_service = Arc::new(ExpenseService::new(expense_repo.clone(), timezone));
    let income_service = Arc::new(IncomeService::new(income_repo.clone()));
    let goal_service = Arc::new(GoalService::new(goal_repo.clone()));
    let dashboard_service = Arc::new(DashboardService::new(
        expense_repo.clone(),
        income_repo.clone(),
        timezone,
    ));
    let report_service = Arc::new(ReportService::new(
        expense_repo.clone(),
        income_repo.clone(),
        timezone,
    ));
    let admin_service = Arc::new(AdminService::new(
        expense_repo,
        income_repo,
        goal_repo,
        activity_repo,
        timezone,
    ));

    Arc::new(AppState {
        auth_service,
        expense_service,
        income_service,
        goal_service,
        dashboard_service,
        report_service,
        admin_service,
    })
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let baas_config = BaasConfig::new(&config.baas_url, &config.baas_anon_key)
        .with_timeout(config.request_timeout);
    // Keep serving: every backend call answers 503 until credentials are set.
    match baas_config.validate() {
        Ok(()) => tracing::info!("Backend in use: {}", baas_config.url),
        Err(e) => tracing::error!("{}", e),
    }

    let client = Arc::new(BaasClient::new(baas_config)?);
    let backends = Backends {
        auth_provider: Arc::new(BaasAuthProvider::new(client.clone())),
        expense_repo: Arc::new(ExpenseRepository::new(client.clone())),
        income_repo: Arc::new(IncomeRepository::new(client.clone())),
        goal_repo: Arc::new(GoalRepository::new(client.clone())),
        activity_repo: Arc::new(ActivityRepository::new(client)),
    };
    if !config.admin_emails.is_empty() {
        tracing::info!("{} admin email(s) configured", config.admin_emails.len());
    }
    let role_policy = RolePolicy::new(&config.admin_emails);

    Ok(assemble_state(backends, role_policy, config.timezone))
}
