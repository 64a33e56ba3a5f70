//! Sample contacts loaded into an empty directory.

use crate::models::Contact;
use chrono::NaiveDate;

fn text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[allow(clippy::too_many_arguments)]
fn sample(
    id: i64,
    name: (&str, &str),
    company: &str,
    email: &str,
    birth_date: Option<NaiveDate>,
    phones: (&str, &str),
    address: (&str, &str, &str, &str, &str),
    notes: &str,
) -> Contact {
    let (address1, city, state, zip, country) = address;
    Contact {
        id,
        first_name: text(name.0),
        last_name: text(name.1),
        company: text(company),
        email: text(email),
        birth_date,
        work_phone: text(phones.0),
        home_phone: text(phones.1),
        address1: text(address1),
        city: text(city),
        state: text(state),
        zip: text(zip),
        country: text(country),
        notes: text(notes),
        ..Default::default()
    }
}

/// The five sample contacts, in identifier order.
pub fn sample_contacts() -> Vec<Contact> {
    vec![
        sample(
            1,
            ("David", "Rose"),
            "Rose Apothecary",
            "david.rose@roseapothecary.com",
            NaiveDate::from_ymd_opt(1983, 8, 9),
            ("(111) 111-1111", "(222) 222-2222"),
            ("123 Main Street", "Schitts Creek", "ON", "M4K 1A2", "CA"),
            "Ew, David!",
        ),
        sample(
            2,
            ("Leslie", "Knope"),
            "National Park Service",
            "leslie.knope@gryzzl.com",
            NaiveDate::from_ymd_opt(1975, 1, 18),
            ("(333) 333-3333", "(444) 444-4444"),
            ("345 Main Street", "Pawnee", "IN", "12345", "US"),
            "Happy Galentines Day!",
        ),
        sample(
            3,
            ("Sterling", "Archer"),
            "Figgis Agency",
            "archer@dangerzone.com",
            None,
            ("(555) 555-5555", ""),
            ("123 Mystery Ave", "New York", "NY", "", "US"),
            "World's greatest secret agent",
        ),
        sample(
            4,
            ("Frank", "Reynolds"),
            "Wolf Cola",
            "frank@wolfcola.com",
            NaiveDate::from_ymd_opt(1944, 11, 1),
            ("(666) 666-6666", "(777) 777-7777"),
            ("Paddy's Pub", "Philadelphia", "PA", "19103", "US"),
            "The Warthog",
        ),
        sample(
            5,
            ("Frankie", "Bergstein"),
            "Vibrant",
            "frankie@deltaco.com",
            NaiveDate::from_ymd_opt(1939, 9, 1),
            ("", "(888) 888-8888"),
            ("12345 Beach Street", "Los Angeles", "CA", "90009", "US"),
            "Not a fan of Sante Fe",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_contacts_have_unique_ordered_ids() {
        let contacts = sample_contacts();
        let ids: Vec<i64> = contacts.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_blank_source_fields_are_unset() {
        let contacts = sample_contacts();
        assert!(contacts[2].home_phone.is_none());
        assert!(contacts[2].birth_date.is_none());
        assert!(contacts[4].work_phone.is_none());
        assert!(contacts[0].address2.is_none());
    }
}
