use super::{format_brl, Cents, Kind};

/// Build the assistant acknowledgment for a just-recorded message.
///
/// Pure lookup keyed by kind; income and expense interpolate the formatted
/// amount when one was extracted. Callers decide whether and when to append
/// the reply to the log.
pub fn respond(kind: Kind, amount_cents: Cents) -> String {
    match kind {
        Kind::Reset => {
            "Saldo zerado com sucesso! Todas as entradas e saídas foram removidas.".to_string()
        }
        Kind::Income if amount_cents > 0 => format!(
            "Ótimo! Registrei uma entrada de {}. Seu saldo foi atualizado.",
            format_brl(amount_cents)
        ),
        Kind::Expense if amount_cents > 0 => format!(
            "Entendi. Registrei uma saída de {}. Continue controlando seus gastos!",
            format_brl(amount_cents)
        ),
        _ => "Como posso ajudar com suas finanças hoje?".to_string(),
    }
}
