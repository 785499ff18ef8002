use crate::domain::models::ElfSpecialty;

/// Requested assignee value that asks the workshop to pick an elf.
pub const AUTO_ASSIGN: &str = "auto";

/// Assignee recorded when the workshop has no elves at all.
pub const UNASSIGNED: &str = "Unassigned";

/// Resolves who works on a new order.
///
/// An explicit elf name is kept as-is. When the request is empty or
/// [`AUTO_ASSIGN`], the first elf (in stored order) whose specialty equals the
/// order category wins. Without a match a non-empty request is stored
/// verbatim, so `"auto"` survives; an empty request goes to the first elf on
/// the roster, or [`UNASSIGNED`] when there are no elves.
pub fn resolve_assignee(roster: &[ElfSpecialty], category: &str, requested: Option<&str>) -> String {
    let requested = requested.filter(|name| !name.is_empty());
    if let Some(name) = requested.filter(|name| *name != AUTO_ASSIGN) {
        return name.to_string();
    }

    if let Some(elf) = roster.iter().find(|elf| elf.specialty == category) {
        return elf.name.clone();
    }

    if let Some(name) = requested {
        return name.to_string();
    }

    roster
        .first()
        .map(|elf| elf.name.clone())
        .unwrap_or_else(|| UNASSIGNED.to_string())
}
