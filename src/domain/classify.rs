use super::Kind;

/// Exact command that records a reset boundary.
const RESET_COMMAND: &str = "zerar saldo";

/// Fixed keyword sets, matched as substrings of the lowercased input.
/// No stemming, no negation handling: "recebi salário" matches "recebi",
/// not the accented "salário".
const INCOME_KEYWORDS: &[&str] = &["salario", "recebi", "ganhei", "entrada"];
const EXPENSE_KEYWORDS: &[&str] = &["paguei", "gastei", "comprei", "saida"];

/// Classify free-form text into a ledger message kind.
///
/// The reset command is an exact match; income keywords are checked strictly
/// before expense keywords, so a text matching both sets classifies as income.
pub fn classify(text: &str) -> Kind {
    let lower = text.trim().to_lowercase();

    if lower == RESET_COMMAND {
        return Kind::Reset;
    }

    if INCOME_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Kind::Income;
    }
    if EXPENSE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        return Kind::Expense;
    }

    Kind::Unclassified
}
