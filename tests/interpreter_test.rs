mod common;

use anyhow::Result;
use chrono::Utc;
use saldo::application::AppError;
use saldo::domain::{month_label, Kind};

use common::bare_service;

#[tokio::test]
async fn test_end_to_end_income_then_expense() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;
    service.set_conversational(false);

    service.submit("Recebi salário: R$ 3.500,00").await?;
    service.submit("Paguei mercado: R$ 850,00").await?;

    let current_month = month_label(Utc::now());
    let totals = service.totals(Some(&current_month));
    assert_eq!(totals.balance, 265000);
    assert_eq!(totals.total_income, 350000);
    assert_eq!(totals.total_expense, 85000);

    // Same result with no filter, since both messages share the month
    assert_eq!(service.totals(None), totals);
    Ok(())
}

#[tokio::test]
async fn test_submission_records_classification_and_amount() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;
    service.set_conversational(false);

    let result = service.submit("  Recebi salário: R$ 3.500,00  ").await?;
    assert_eq!(result.message.kind, Kind::Income);
    assert_eq!(result.message.amount_cents, 350000);
    assert_eq!(result.message.text, "Recebi salário: R$ 3.500,00");
    assert_eq!(result.message.sequence, 1);
    assert!(result.reply.is_none());
    Ok(())
}

#[tokio::test]
async fn test_reset_bypasses_amount_extraction() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;
    service.set_conversational(false);

    // A reset never carries an amount, even when the text holds digits
    let result = service.submit("Zerar Saldo").await?;
    assert_eq!(result.message.kind, Kind::Reset);
    assert_eq!(result.message.amount_cents, 0);
    Ok(())
}

#[tokio::test]
async fn test_unparsable_amount_degrades_to_zero() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;
    service.set_conversational(false);

    let result = service.submit("paguei a conta de luz").await?;
    assert_eq!(result.message.kind, Kind::Expense);
    assert_eq!(result.message.amount_cents, 0);
    // Original text is preserved for later manual correction
    assert_eq!(result.message.text, "paguei a conta de luz");
    Ok(())
}

#[tokio::test]
async fn test_unclassified_message_carries_amount_but_not_balance() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;
    service.set_conversational(false);

    let result = service.submit("almoço R$ 25,00").await?;
    assert_eq!(result.message.kind, Kind::Unclassified);
    assert_eq!(result.message.amount_cents, 2500);

    let totals = service.totals(None);
    assert_eq!(totals.balance, 0);
    assert_eq!(totals.total_income, 0);
    assert_eq!(totals.total_expense, 0);
    Ok(())
}

#[tokio::test]
async fn test_empty_message_is_rejected() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;

    let err = service.submit("   ").await.unwrap_err();
    assert!(matches!(err, AppError::EmptyMessage));
    assert!(service.messages().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_conversational_reply_is_appended_after_message() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;

    let result = service.submit("Recebi R$ 100,00").await?;
    let reply = result.reply.expect("conversational mode is on by default");

    assert_eq!(reply.kind, Kind::AssistantReply);
    assert_eq!(reply.amount_cents, 0);
    assert_eq!(reply.month, result.message.month);
    assert!(reply.sequence > result.message.sequence);
    assert!(reply.text.contains("R$ 100,00"));

    // Replies never move the totals
    let totals = service.totals(None);
    assert_eq!(totals.balance, 10000);
    assert_eq!(totals.total_income, 10000);
    assert_eq!(totals.total_expense, 0);
    Ok(())
}

#[tokio::test]
async fn test_no_reply_when_conversational_mode_is_off() -> Result<()> {
    let (mut service, _temp) = bare_service().await?;
    service.set_conversational(false);

    let result = service.submit("Recebi R$ 100,00").await?;
    assert!(result.reply.is_none());
    assert_eq!(service.messages().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_months_lists_twelve_tabs_current_first() -> Result<()> {
    let (service, _temp) = bare_service().await?;

    let months = service.months();
    assert_eq!(months.len(), 12);
    assert_eq!(months[0], month_label(Utc::now()));
    Ok(())
}
