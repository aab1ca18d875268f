use crate::models::inquiry::{DerivedStatus, InquiryRecord, InterestLevel, ServiceStatus};

/// Infers the lifecycle state of one engagement from its raw signals.
///
/// Total over any record; the rules form a fixed-priority decision table
/// and the first match wins. The ordering is the policy: do not reorder
/// without sign-off from the operations owner.
pub fn derive_status(record: &InquiryRecord) -> DerivedStatus {
    let stored = record.stored_status();

    if matches!(
        stored,
        Some(ServiceStatus::Terminated | ServiceStatus::TerminatedService)
    ) {
        return DerivedStatus::TerminatedService;
    }

    if matches!(stored, Some(ServiceStatus::NotInterested)) {
        return DerivedStatus::NotInterested;
    }

    let confirmed = record.confirmed();
    let paid = record.payment_made;
    let staffed = record.staff_assigned();

    if confirmed && paid && staffed {
        return DerivedStatus::Active;
    }

    if confirmed && !paid {
        return DerivedStatus::PaymentPending;
    }

    // Unreachable while the Not Interested check above runs first; kept in
    // the documented rule order. Flagged with the operations owner
    // (DESIGN.md, open questions) rather than silently reordered.
    if matches!(stored, Some(ServiceStatus::NotInterested))
        && matches!(
            record.interest_level,
            InterestLevel::High | InterestLevel::Medium
        )
    {
        return DerivedStatus::FollowUp;
    }

    if paid && !staffed {
        return DerivedStatus::StaffIssue;
    }

    if confirmed && !staffed {
        return DerivedStatus::PendingAllocation;
    }

    match stored {
        Some(status) => DerivedStatus::from(status),
        None => DerivedStatus::PendingAllocation,
    }
}
