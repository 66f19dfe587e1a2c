use crate::server::{
    data::leave::LeaveRecordRepository,
    error::AppError,
    model::{actor::Actor, leave::LeaveRecord},
    service::{
        leave::LeaveService,
        policy::{authorize, LeaveAction},
    },
};

impl<'a> LeaveService<'a> {
    /// Lists the active records visible to the actor, newest first.
    ///
    /// Actors allowed to view all records see everyone's; everybody else sees only
    /// their own.
    pub async fn list(&self, actor: &Actor) -> Result<Vec<LeaveRecord>, AppError> {
        let repo = LeaveRecordRepository::new(self.store);

        let mut records = if authorize(actor, LeaveAction::ViewAll, &self.config).is_ok() {
            repo.all().await?
        } else {
            repo.find_by_user(actor.user_id).await?
        };

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }
}
