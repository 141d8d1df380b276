/// Syntactic email check used by the personal section.
///
/// Local part: letters, digits and `_ ' + - .`, must not start with `.` and
/// must end in a letter, digit, `_`, `+` or `-`. Domain: one or more labels
/// that start with a letter or digit and contain only letters, digits and
/// `-`, followed by an alphabetic top-level label of at least two letters.
/// `..` is rejected anywhere in the address.
pub fn is_valid_email(value: &str) -> bool {
    if value.contains("..") {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    is_valid_local(local) && is_valid_domain(domain)
}

fn is_valid_local(local: &str) -> bool {
    let Some(last) = local.chars().last() else {
        return false;
    };
    if local.starts_with('.') {
        return false;
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.');
    local.chars().all(allowed) && (last.is_ascii_alphanumeric() || matches!(last, '_' | '+' | '-'))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    if hosts.is_empty() {
        return false;
    }
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    let hosts_ok = hosts.iter().all(|label| {
        label
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    tld_ok && hosts_ok
}
