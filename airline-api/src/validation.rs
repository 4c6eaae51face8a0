use airline_core::{Flight, Passenger, User};

use crate::error::AppError;

/// Field-level checks on request payloads, collected rather than short-circuited.
pub trait Validate {
    fn violations(&self) -> Vec<String>;
}

pub fn validate<T: Validate>(payload: &T) -> Result<(), AppError> {
    let violations = payload.violations();
    if violations.is_empty() {
        return Ok(());
    }
    Err(AppError::ValidationError(format!(
        "Invalid request data:\n{}",
        violations.join("\n")
    )))
}

/// Eight digits followed by one letter, e.g. `12345678A`.
pub fn is_valid_nif(nif: &str) -> bool {
    let bytes = nif.as_bytes();
    bytes.len() == 9
        && bytes[..8].iter().all(u8::is_ascii_digit)
        && bytes[8].is_ascii_alphabetic()
}

/// `local@domain.tld` with a purely alphabetic tld of two or more letters.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    let host_ok = !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || ".-".contains(c));
    let tld_ok = tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic());
    local_ok && host_ok && tld_ok
}

fn require(violations: &mut Vec<String>, value: &str, field: &str) {
    if value.trim().is_empty() {
        violations.push(format!("{} must not be blank", field));
    }
}

impl Validate for Flight {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.code, "idCode");
        require(&mut v, &self.id, "id");
        require(&mut v, &self.origin, "origin");
        require(&mut v, &self.destination, "destination");
        v
    }
}

impl Validate for Passenger {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        if !is_valid_nif(&self.nif) {
            v.push("nif must be 8 digits followed by a letter".to_string());
        }
        require(&mut v, &self.flight_code, "flightIdCode");
        require(&mut v, &self.name, "name");
        require(&mut v, &self.surname, "surname");
        if !is_valid_email(&self.email) {
            v.push("email must look like user@domain.com".to_string());
        }
        v
    }
}

impl Validate for User {
    fn violations(&self) -> Vec<String> {
        let mut v = Vec::new();
        require(&mut v, &self.username, "username");
        if self.username.contains(|c: char| c == '%' || c == '/') {
            v.push("username must not contain '%' or '/'".to_string());
        }
        match &self.password {
            Some(p) if !p.expose().trim().is_empty() => {}
            _ => v.push("password must not be blank".to_string()),
        }
        if !is_valid_nif(self.nif.expose()) {
            v.push("nif must be 8 digits followed by a letter".to_string());
        }
        require(&mut v, &self.name, "name");
        require(&mut v, &self.surname, "surname");
        if !is_valid_email(self.email.expose()) {
            v.push("email must look like user@domain.com".to_string());
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airline_core::Role;
    use airline_shared::Masked;

    #[test]
    fn test_nif_shape() {
        assert!(is_valid_nif("12345678A"));
        assert!(is_valid_nif("12345678z"));
        assert!(!is_valid_nif("1234567A"));
        assert!(!is_valid_nif("123456789"));
        assert!(!is_valid_nif("12345678AB"));
        assert!(!is_valid_nif("1234567ñA"));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("ana.gil+air@example.co.uk"));
        assert!(!is_valid_email("ana@example"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana@example.c"));
        assert!(!is_valid_email("ana example@example.com"));
    }

    #[test]
    fn test_passenger_violations_are_collected() {
        let p = Passenger {
            nif: "bad".into(),
            flight_code: "IB100".into(),
            name: " ".into(),
            surname: "Gil".into(),
            email: "nope".into(),
            seat_number: 1,
        };
        assert_eq!(p.violations().len(), 3);
        assert!(validate(&p).is_err());
    }

    #[test]
    fn test_username_rejects_path_escapes() {
        let user = |username: &str| User {
            username: username.into(),
            name: "Ana".into(),
            surname: "Gil".into(),
            nif: Masked::new("12345678A".into()),
            email: Masked::new("ana@example.com".into()),
            password: Some(Masked::new("pw".into())),
            roles: vec![Role::new("ROLE_usuario")],
        };
        assert!(user("ana").violations().is_empty());
        assert_eq!(user("b%6Fb").violations().len(), 1);
        assert_eq!(user("a/b").violations().len(), 1);
    }
}
