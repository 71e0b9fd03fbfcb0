use std::{collections::HashMap, sync::Arc};

use chrono::{NaiveDate, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    entities::subscriptions::{
        EditSubscriptionEntity, InsertSubscriptionEntity, SubscriptionEntity,
    },
    errors::{EngineError, EngineResult},
    repositories::{
        features::FeatureRepository, plans::PlanRepository,
        subscriptions::SubscriptionRepository, users::UserRepository,
    },
    value_objects::{
        catalog::PlanDetailDto,
        enums::subscription_statuses::SubscriptionStatus,
        subscriptions::{CreateSubscriptionModel, SubscriptionDetailDto, SubscriptionListDto},
    },
};

pub struct SubscriptionUseCase<S, P, U, F>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FeatureRepository + Send + Sync + 'static,
{
    subscription_repo: Arc<S>,
    plan_repo: Arc<P>,
    user_repo: Arc<U>,
    feature_repo: Arc<F>,
}

impl<S, P, U, F> SubscriptionUseCase<S, P, U, F>
where
    S: SubscriptionRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
    F: FeatureRepository + Send + Sync + 'static,
{
    pub fn new(
        subscription_repo: Arc<S>,
        plan_repo: Arc<P>,
        user_repo: Arc<U>,
        feature_repo: Arc<F>,
    ) -> Self {
        Self {
            subscription_repo,
            plan_repo,
            user_repo,
            feature_repo,
        }
    }

    /// Subscribes a user to a plan, billing the plan's current price.
    pub async fn create_subscription(
        &self,
        model: CreateSubscriptionModel,
    ) -> EngineResult<SubscriptionEntity> {
        let user_id = model.user_id;
        let plan_id = model.plan_id;
        info!(%user_id, %plan_id, "subscriptions: create requested");

        if let Some(end_date) = model.end_date {
            if end_date < model.start_date {
                warn!(
                    %user_id,
                    %plan_id,
                    start_date = %model.start_date,
                    %end_date,
                    "subscriptions: end date precedes start date"
                );
                return Err(EngineError::validation(format!(
                    "end_date {end_date} precedes start_date {}",
                    model.start_date
                )));
            }
        }

        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "subscriptions: failed to load user");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("user", user_id))?;

        let plan = self
            .plan_repo
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "subscriptions: failed to load plan");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("plan", plan_id))?;

        if !plan.is_active {
            warn!(%user_id, %plan_id, "subscriptions: plan is inactive");
            return Err(EngineError::validation(format!("plan {plan_id} is not active")));
        }

        let now = Utc::now();
        let subscription = self
            .subscription_repo
            .insert(InsertSubscriptionEntity {
                user_id,
                plan_id,
                plan_cost: plan.price,
                start_date: model.start_date,
                end_date: model.end_date,
                status: SubscriptionStatus::Active,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(%user_id, %plan_id, db_error = ?err, "subscriptions: failed to insert subscription");
                EngineError::Internal(err)
            })?;

        info!(
            subscription_id = %subscription.id,
            %user_id,
            %plan_id,
            plan_cost = %subscription.plan_cost,
            "subscriptions: subscription created"
        );
        Ok(subscription)
    }

    /// Moves the end date forward. Suspended subscriptions may be renewed; cancelled ones may not.
    pub async fn renew(
        &self,
        subscription_id: Uuid,
        new_end_date: NaiveDate,
    ) -> EngineResult<SubscriptionEntity> {
        let current = self.load(subscription_id).await?;

        if current.status.is_terminal() {
            warn!(%subscription_id, "subscriptions: renewal of cancelled subscription rejected");
            return Err(EngineError::InvalidTransition {
                from: current.status,
                to: SubscriptionStatus::Active,
            });
        }

        let Some(current_end) = current.end_date else {
            warn!(%subscription_id, "subscriptions: open-ended subscription cannot be renewed");
            return Err(EngineError::validation(
                "open-ended subscription has no end date to extend",
            ));
        };

        if new_end_date <= current_end {
            warn!(
                %subscription_id,
                %current_end,
                %new_end_date,
                "subscriptions: renewal does not extend the subscription"
            );
            return Err(EngineError::validation(format!(
                "new end_date {new_end_date} must be after current end_date {current_end}"
            )));
        }

        let edit = EditSubscriptionEntity {
            status: current.status,
            end_date: Some(new_end_date),
            updated_at: Utc::now(),
        };
        let renewed = self.write(&current, edit).await?;

        info!(%subscription_id, %new_end_date, "subscriptions: subscription renewed");
        Ok(renewed)
    }

    pub async fn suspend(&self, subscription_id: Uuid) -> EngineResult<SubscriptionEntity> {
        self.transition(subscription_id, SubscriptionStatus::Suspended)
            .await
    }

    pub async fn resume(&self, subscription_id: Uuid) -> EngineResult<SubscriptionEntity> {
        self.transition(subscription_id, SubscriptionStatus::Active)
            .await
    }

    pub async fn cancel(&self, subscription_id: Uuid) -> EngineResult<SubscriptionEntity> {
        self.transition(subscription_id, SubscriptionStatus::Cancelled)
            .await
    }

    /// Status change from an untyped value, e.g. a request body.
    pub async fn change_status(
        &self,
        subscription_id: Uuid,
        raw_status: &str,
    ) -> EngineResult<SubscriptionEntity> {
        let target = SubscriptionStatus::parse(raw_status).inspect_err(|_| {
            warn!(%subscription_id, raw_status, "subscriptions: unknown status value");
        })?;
        self.transition(subscription_id, target).await
    }

    pub async fn transition(
        &self,
        subscription_id: Uuid,
        target: SubscriptionStatus,
    ) -> EngineResult<SubscriptionEntity> {
        let current = self.load(subscription_id).await?;

        let status = current.status.transition_to(target).inspect_err(|_| {
            warn!(
                %subscription_id,
                from = %current.status,
                to = %target,
                "subscriptions: invalid status transition"
            );
        })?;

        let edit = EditSubscriptionEntity {
            status,
            end_date: current.end_date,
            updated_at: Utc::now(),
        };
        let updated = self.write(&current, edit).await?;

        info!(
            %subscription_id,
            from = %current.status,
            to = %updated.status,
            version = updated.version,
            "subscriptions: status changed"
        );
        Ok(updated)
    }

    pub async fn list_subscriptions(&self) -> EngineResult<Vec<SubscriptionListDto>> {
        let mut subscriptions = self.subscription_repo.list_all().await.map_err(|err| {
            error!(db_error = ?err, "subscriptions: failed to list subscriptions");
            EngineError::Internal(err)
        })?;
        subscriptions.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));

        let mut user_ids: Vec<Uuid> = subscriptions.iter().map(|s| s.user_id).collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let users: HashMap<Uuid, _> = self
            .user_repo
            .list_by_ids(user_ids)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: failed to load users for listing");
                EngineError::Internal(err)
            })?
            .into_iter()
            .map(|user| (user.id, user))
            .collect();

        let plans: HashMap<Uuid, _> = self
            .plan_repo
            .list_plans()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "subscriptions: failed to load plans for listing");
                EngineError::Internal(err)
            })?
            .into_iter()
            .map(|plan| (plan.id, plan))
            .collect();

        let rows = subscriptions
            .iter()
            .filter_map(|subscription| {
                match (users.get(&subscription.user_id), plans.get(&subscription.plan_id)) {
                    (Some(user), Some(plan)) => {
                        Some(SubscriptionListDto::project(subscription, user, plan))
                    }
                    _ => {
                        warn!(
                            subscription_id = %subscription.id,
                            user_id = %subscription.user_id,
                            plan_id = %subscription.plan_id,
                            "subscriptions: dangling reference, row skipped"
                        );
                        None
                    }
                }
            })
            .collect();

        Ok(rows)
    }

    pub async fn get_subscription(&self, subscription_id: Uuid) -> EngineResult<SubscriptionDetailDto> {
        let subscription = self.load(subscription_id).await?;

        let user = self
            .user_repo
            .find_by_id(subscription.user_id)
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "subscriptions: failed to load user");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("user", subscription.user_id))?;

        let plan = self
            .plan_repo
            .find_by_id(subscription.plan_id)
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "subscriptions: failed to load plan");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("plan", subscription.plan_id))?;

        let features = self
            .feature_repo
            .list_by_ids(plan.feature_ids.iter().copied().collect())
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "subscriptions: failed to load plan features");
                EngineError::Internal(err)
            })?;

        Ok(SubscriptionDetailDto::project(
            subscription,
            user,
            PlanDetailDto::project(plan, features),
        ))
    }

    async fn load(&self, subscription_id: Uuid) -> EngineResult<SubscriptionEntity> {
        self.subscription_repo
            .find_by_id(subscription_id)
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "subscriptions: failed to load subscription");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| EngineError::not_found("subscription", subscription_id))
    }

    async fn write(
        &self,
        current: &SubscriptionEntity,
        edit: EditSubscriptionEntity,
    ) -> EngineResult<SubscriptionEntity> {
        let subscription_id = current.id;
        let expected_version = current.version;

        self.subscription_repo
            .update_if_version(subscription_id, expected_version, edit)
            .await
            .map_err(|err| {
                error!(%subscription_id, db_error = ?err, "subscriptions: failed to update subscription");
                EngineError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(
                    %subscription_id,
                    expected_version,
                    "subscriptions: concurrent modification detected"
                );
                EngineError::Conflict {
                    subscription_id,
                    expected_version,
                }
            })
    }
}
