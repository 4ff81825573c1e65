use chrono::{DateTime, Utc};
use mockall_double::double;
use mongodb::{
    bson::{doc, DateTime as BsonDateTime, Document},
    options::{FindOneOptions, IndexOptions},
    IndexModel,
};
use std::{sync::Arc, time::Duration};

use crate::{
    constants::*,
    models::otp::{OtpIdentifier, OtpPurpose, OtpRecord},
    utils::generate_otp,
};

#[double]
use crate::database::AppDatabase;

/// Result of checking a user supplied code against the store
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyOutcome {
    /// no unverified record exists for the identifier and purpose
    NotFound,
    Verified(OtpRecord),
    /// the record as it stands after the attempt, its state tells why
    Rejected(OtpRecord),
}

/// Indexes backing the otp collection.
/// The TTL index lets mongodb remove a record as soon as `expiresAt` passes.
pub fn otp_indexes() -> Vec<IndexModel> {
    let ttl_options = IndexOptions::builder()
        .name("otp_expires_at_ttl".to_string())
        .expire_after(Duration::from_secs(0))
        .build();
    let ttl = IndexModel::builder()
        .keys(doc! {"expiresAt": 1})
        .options(ttl_options)
        .build();
    let by_email = IndexModel::builder()
        .keys(doc! {"email": 1, "purpose": 1, "verified": 1})
        .options(
            IndexOptions::builder()
                .name("otp_email_lookup".to_string())
                .sparse(true)
                .build(),
        )
        .build();
    let by_phone = IndexModel::builder()
        .keys(doc! {"phone": 1, "purpose": 1, "verified": 1})
        .options(
            IndexOptions::builder()
                .name("otp_phone_lookup".to_string())
                .sparse(true)
                .build(),
        )
        .build();
    vec![ttl, by_email, by_phone]
}

pub async fn ensure_otp_indexes(db: &Arc<AppDatabase>) -> anyhow::Result<()> {
    let names = db
        .create_indexes(DB_NAME, COLL_OTP, otp_indexes(), None)
        .await?;
    tracing::debug!("otp indexes ready: {:?}", names);
    Ok(())
}

fn pending_filter(identifier: &OtpIdentifier, purpose: OtpPurpose) -> Document {
    let mut filter = identifier.to_filter(purpose);
    filter.insert("verified", false);
    filter
}

/// Filter matching every record of the pair which can never be used again
fn stale_filter(identifier: &OtpIdentifier, purpose: OtpPurpose, now: DateTime<Utc>) -> Document {
    let mut filter = identifier.to_filter(purpose);
    let now = BsonDateTime::from_chrono(now);
    filter.insert(
        "$or",
        vec![
            doc! {"verified": true},
            doc! {"expiresAt": {"$lt": now}},
            doc! {"attemptCount": {"$gte": OTP_MAX_ATTEMPTS}},
        ],
    );
    filter
}

/// Delete verified, expired and exhausted records of the pair.
/// Pending usable records are left alone.
pub async fn cleanup_otps(
    db: &Arc<AppDatabase>,
    identifier: &OtpIdentifier,
    purpose: OtpPurpose,
) -> anyhow::Result<u64> {
    let filter = stale_filter(identifier, purpose, Utc::now());
    let deleted = db.delete_many(DB_NAME, COLL_OTP, filter, None).await?;
    tracing::debug!("Deleted {deleted} stale {purpose} otp(s) for {identifier}");
    Ok(deleted)
}

/// Newest unverified record of the pair, usable or not
pub async fn find_pending_otp(
    db: &Arc<AppDatabase>,
    identifier: &OtpIdentifier,
    purpose: OtpPurpose,
) -> anyhow::Result<Option<OtpRecord>> {
    let filter = pending_filter(identifier, purpose);
    let options = FindOneOptions::builder()
        .sort(doc! {"createdAt": -1})
        .build();
    let otp = db
        .find_one::<OtpRecord>(DB_NAME, COLL_OTP, Some(filter), Some(options))
        .await?;
    Ok(otp)
}

/// Cleanup the pair, then mint and store a fresh code
pub async fn issue_otp(
    db: &Arc<AppDatabase>,
    identifier: &OtpIdentifier,
    purpose: OtpPurpose,
) -> anyhow::Result<OtpRecord> {
    cleanup_otps(db, identifier, purpose).await?;
    let code = generate_otp();
    let mut otp = OtpRecord::new(identifier, purpose, &code);
    let id = db
        .insert_one::<OtpRecord>(DB_NAME, COLL_OTP, &otp, None)
        .await?;
    otp.id = id.as_object_id();
    tracing::debug!("Issued {purpose} otp for {identifier}");
    Ok(otp)
}

/// Check `input` against the newest pending record of the pair.
///
/// The attempt is applied with a compare-and-set keyed on the attempt count
/// that was read, so two concurrent submissions can never both spend the
/// same attempt or both verify the record. A lost race re-reads and retries.
pub async fn verify_otp(
    db: &Arc<AppDatabase>,
    identifier: &OtpIdentifier,
    purpose: OtpPurpose,
    input: &str,
) -> anyhow::Result<VerifyOutcome> {
    let Some(mut current) = find_pending_otp(db, identifier, purpose).await? else {
        return Ok(VerifyOutcome::NotFound);
    };
    let id = current
        .id
        .ok_or(anyhow::anyhow!("Otp record for {identifier} has no _id"))?;
    for _ in 0..OTP_VERIFY_RETRIES {
        let now = Utc::now();
        if !current.is_usable_at(now) {
            tracing::debug!("Otp {id} rejected, state: {}", current.state_at(now));
            return Ok(VerifyOutcome::Rejected(current));
        }
        let mut next = current.clone();
        let matched = next.verify_at(input, now);
        let filter = doc! {
            "_id": id,
            "verified": false,
            "attemptCount": current.attempt_count,
        };
        let update = doc! {"$set": {
            "attemptCount": next.attempt_count,
            "verified": next.verified,
            "updatedAt": BsonDateTime::from_chrono(now),
        }};
        let result = db
            .update_one(DB_NAME, COLL_OTP, filter, update, None)
            .await?;
        if result.matched == 1 {
            let state = next.state_at(now);
            tracing::debug!("Otp {id} attempt {}, state: {state}", next.attempt_count);
            let outcome = if matched {
                VerifyOutcome::Verified(next)
            } else {
                VerifyOutcome::Rejected(next)
            };
            return Ok(outcome);
        }
        tracing::debug!("Otp {id} changed concurrently, retrying");
        let filter = Some(doc! {"_id": id});
        match db
            .find_one::<OtpRecord>(DB_NAME, COLL_OTP, filter, None)
            .await?
        {
            Some(otp) => current = otp,
            // removed by cleanup or the TTL index in the meantime
            None => return Ok(VerifyOutcome::NotFound),
        }
    }
    let err = anyhow::anyhow!("Not able to apply otp attempt for {identifier}");
    Err(err)
}

/// Hand the code to the channel the record was issued for.
/// The code itself never goes to the logs.
pub fn deliver_otp(otp: &OtpRecord) -> anyhow::Result<()> {
    let identifier = otp
        .identifier()
        .ok_or(anyhow::anyhow!("Otp record has neither email nor phone"))?;
    // SMS/email gateway is to be called from here
    tracing::debug!("{}", delivery_log(&identifier, otp));
    Ok(())
}

fn delivery_log(identifier: &OtpIdentifier, otp: &OtpRecord) -> String {
    let purpose = otp.purpose;
    let expires_at = otp.expires_at;
    format!("Sent {purpose} otp to {identifier}, valid till {expires_at}")
}
