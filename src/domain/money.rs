/// Format an amount as Brazilian reais, the way a pt-BR locale displays it:
/// `R$ 1.234,56` (with a non-breaking space after the symbol).
pub fn brl(value: f64) -> String {
    const PREFIX: &str = "R$\u{a0}";

    if value.is_nan() {
        return format!("{PREFIX}NaN");
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{sign}{PREFIX}∞");
    }

    let cents = (value.abs() * 100.0).round();
    let whole = (cents / 100.0).trunc();
    let fraction = cents - whole * 100.0;

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && cents > 0.0 { "-" } else { "" };
    format!("{sign}{PREFIX}{grouped},{fraction:02.0}")
}
