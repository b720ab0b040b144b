//! Availability policy read and replace

use slotwise_domain::AvailabilityPolicy;

use super::CommandError;
use crate::context::AppContext;
use crate::utils::command_helpers::execute_command;

pub async fn get_policy(ctx: &AppContext, owner_id: &str) -> Result<AvailabilityPolicy, CommandError> {
    execute_command("policy::get", || async {
        ctx.availability.policy(owner_id).await.map_err(|err| match CommandError::from(err) {
            not_found if not_found.is_not_found() => CommandError::new(
                not_found.kind,
                "owner_not_found",
                format!("No availability policy for {owner_id}"),
            ),
            other => other,
        })
    })
    .await
}

/// Replaces the owner's policy. Existing bookings are kept even when they
/// fall outside the new hours.
pub async fn update_policy(
    ctx: &AppContext,
    owner_id: &str,
    policy: AvailabilityPolicy,
) -> Result<AvailabilityPolicy, CommandError> {
    execute_command("policy::update", || async {
        ctx.availability.save_policy(owner_id, policy.clone()).await?;
        Ok(policy)
    })
    .await
}
