use crate::server::{
    data::{leave::LeaveRecordRepository, store::JsonStore},
    error::{leave::LeaveError, store::StoreError, AppError},
    model::leave::LeaveStatus,
};
use test_utils::{
    builder::TestBuilder,
    collection, factory,
    fixture::discord::{APPROVER_ID, OTHER_STAFF_ID, REQUESTER_ID},
};

mod find_by_id;
mod modify;
