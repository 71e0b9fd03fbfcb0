use std::{collections::BTreeSet, sync::Arc};

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::{features::InsertFeatureEntity, plans::InsertPlanEntity},
    errors::{EngineError, EngineResult},
    repositories::{features::FeatureRepository, plans::PlanRepository},
    value_objects::{
        catalog::{CreateFeatureModel, CreatePlanModel, FeatureDto, PlanDetailDto, PlanListDto},
        money::ensure_non_negative,
    },
};

pub struct CatalogUseCase<F, P>
where
    F: FeatureRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    feature_repo: Arc<F>,
    plan_repo: Arc<P>,
}

impl<F, P> CatalogUseCase<F, P>
where
    F: FeatureRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(feature_repo: Arc<F>, plan_repo: Arc<P>) -> Self {
        Self {
            feature_repo,
            plan_repo,
        }
    }

    pub async fn create_feature(&self, model: CreateFeatureModel) -> EngineResult<FeatureDto> {
        let name = Self::required_name("feature name", &model.name)?;

        let existing = self
            .feature_repo
            .find_by_name(name.clone())
            .await
            .map_err(|err| {
                error!(%name, db_error = ?err, "catalog: failed to look up feature by name");
                EngineError::Internal(err)
            })?;
        if existing.is_some() {
            warn!(%name, "catalog: duplicate feature name rejected");
            return Err(EngineError::validation(format!(
                "feature name already exists: {name}"
            )));
        }

        let now = Utc::now();
        let feature = self
            .feature_repo
            .insert(InsertFeatureEntity {
                name,
                description: model.description,
                is_active: true,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "catalog: failed to insert feature");
                EngineError::Internal(err)
            })?;

        info!(feature_id = %feature.id, name = %feature.name, "catalog: feature created");
        Ok(FeatureDto::from(feature))
    }

    pub async fn set_feature_active(
        &self,
        feature_id: Uuid,
        is_active: bool,
    ) -> EngineResult<FeatureDto> {
        let feature = self
            .feature_repo
            .set_active(feature_id, is_active)
            .await
            .map_err(|err| {
                error!(%feature_id, db_error = ?err, "catalog: failed to toggle feature");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("feature", feature_id))?;

        info!(%feature_id, is_active, "catalog: feature activity updated");
        Ok(FeatureDto::from(feature))
    }

    pub async fn create_plan(&self, model: CreatePlanModel) -> EngineResult<PlanDetailDto> {
        let name = Self::required_name("plan name", &model.name)?;
        ensure_non_negative("price", model.price).inspect_err(|_| {
            warn!(%name, price = %model.price, "catalog: negative plan price rejected");
        })?;

        let existing = self
            .plan_repo
            .find_by_name(name.clone())
            .await
            .map_err(|err| {
                error!(%name, db_error = ?err, "catalog: failed to look up plan by name");
                EngineError::Internal(err)
            })?;
        if existing.is_some() {
            warn!(%name, "catalog: duplicate plan name rejected");
            return Err(EngineError::validation(format!(
                "plan name already exists: {name}"
            )));
        }

        let feature_ids: BTreeSet<Uuid> = model.feature_ids.into_iter().collect();
        let features = self
            .feature_repo
            .list_by_ids(feature_ids.iter().copied().collect())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "catalog: failed to load plan features");
                EngineError::Internal(err)
            })?;
        if let Some(missing) = feature_ids
            .iter()
            .find(|id| !features.iter().any(|feature| feature.id == **id))
        {
            warn!(%name, feature_id = %missing, "catalog: plan references unknown feature");
            return Err(EngineError::not_found("feature", *missing));
        }

        let now = Utc::now();
        let plan = self
            .plan_repo
            .insert(InsertPlanEntity {
                name,
                price: model.price,
                billing_cycle: model.billing_cycle,
                description: model.description,
                is_active: true,
                feature_ids,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "catalog: failed to insert plan");
                EngineError::Internal(err)
            })?;

        info!(
            plan_id = %plan.id,
            name = %plan.name,
            price = %plan.price,
            billing_cycle = %plan.billing_cycle,
            "catalog: plan created"
        );
        Ok(PlanDetailDto::project(plan, features))
    }

    /// Changes the list price only; subscriptions keep the cost they were billed at.
    pub async fn update_plan_price(&self, plan_id: Uuid, price: Decimal) -> EngineResult<PlanListDto> {
        ensure_non_negative("price", price).inspect_err(|_| {
            warn!(%plan_id, %price, "catalog: negative plan price rejected");
        })?;

        let plan = self
            .plan_repo
            .update_price(plan_id, price)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "catalog: failed to update plan price");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("plan", plan_id))?;

        info!(%plan_id, %price, "catalog: plan price updated");
        Ok(PlanListDto::from(&plan))
    }

    pub async fn set_plan_active(&self, plan_id: Uuid, is_active: bool) -> EngineResult<PlanListDto> {
        let plan = self
            .plan_repo
            .set_active(plan_id, is_active)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "catalog: failed to toggle plan");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("plan", plan_id))?;

        info!(%plan_id, is_active, "catalog: plan activity updated");
        Ok(PlanListDto::from(&plan))
    }

    pub async fn list_plans(&self) -> EngineResult<Vec<PlanListDto>> {
        let plans = self.plan_repo.list_plans().await.map_err(|err| {
            error!(db_error = ?err, "catalog: failed to list plans");
            EngineError::Internal(err)
        })?;

        Ok(plans.iter().map(PlanListDto::from).collect())
    }

    pub async fn get_plan(&self, plan_id: Uuid) -> EngineResult<PlanDetailDto> {
        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "catalog: failed to load plan");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("plan", plan_id))?;

        let features = self
            .feature_repo
            .list_by_ids(plan.feature_ids.iter().copied().collect())
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "catalog: failed to load plan features");
                EngineError::Internal(err)
            })?;

        Ok(PlanDetailDto::project(plan, features))
    }

    fn required_name(field: &str, raw: &str) -> EngineResult<String> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(EngineError::validation(format!("{field} must not be empty")));
        }
        Ok(name.to_string())
    }
}
