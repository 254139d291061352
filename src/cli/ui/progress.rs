use crate::wizard::WizardStep;

/// One-line step indicator: completed, current and pending steps.
pub fn progress_line(current: WizardStep, plain: bool) -> String {
    let (done, active, pending, separator) = if plain {
        ("[x]", "[>]", "[ ]", " > ")
    } else {
        ("✓", "●", "○", " › ")
    };
    WizardStep::ALL
        .iter()
        .map(|step| {
            let marker = match step.cmp(&current) {
                std::cmp::Ordering::Less => done,
                std::cmp::Ordering::Equal => active,
                std::cmp::Ordering::Greater => pending,
            };
            format!("{marker} {}", step.name())
        })
        .collect::<Vec<_>>()
        .join(separator)
}
