//! Demonstration data set.
//!
//! Loaded through the regular add operations, so a seeded catalog obeys the
//! same rules as one built by hand.

use crate::catalog::{Catalog, CatalogError};

/// isbn, title, author, genre, total copies
const DEMO_BOOKS: [(&str, &str, &str, &str, &str); 5] = [
    (
        "978-0-7475-3269-9",
        "Harry Potter and the Philosopher's Stone",
        "J.K. Rowling",
        "Fiction",
        "5",
    ),
    (
        "978-0-590-35340-3",
        "Harry Potter and the Chamber of Secrets",
        "J.K. Rowling",
        "Fiction",
        "3",
    ),
    ("978-0-06-112008-4", "To Kill a Mockingbird", "Harper Lee", "Fiction", "4"),
    ("978-0-553-29337-9", "A Brief History of Time", "Stephen Hawking", "Non-Fiction", "2"),
    ("978-0-7653-7698-5", "The Martian", "Andy Weir", "Sci-Fi", "3"),
];

/// id, name, email, contact
const DEMO_MEMBERS: [(&str, &str, &str, &str); 3] = [
    ("M001", "John Doe", "john.doe@email.com", "123-456-7890"),
    ("M002", "Jane Smith", "jane.smith@email.com", "098-765-4321"),
    ("M003", "Alice Johnson", "alice.j@email.com", "555-123-4567"),
];

/// Add the demo books and members. Fails on the first key collision.
pub fn load_demo(catalog: &mut Catalog) -> Result<(), CatalogError> {
    for (isbn, title, author, genre, copies) in DEMO_BOOKS {
        catalog.add_book(isbn, title, author, genre, copies)?;
    }
    for (id, name, email, contact) in DEMO_MEMBERS {
        catalog.add_member(id, name, email, contact)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EntityKind;

    #[test]
    fn demo_loads_into_empty_catalog() {
        let mut catalog = Catalog::new();
        load_demo(&mut catalog).unwrap();
        assert_eq!(catalog.book_count(), DEMO_BOOKS.len());
        assert_eq!(catalog.member_count(), DEMO_MEMBERS.len());
        assert_eq!(catalog.search_books("harry potter").len(), 2);
        assert!(catalog.list_books().iter().all(|b| b.available_copies == b.total_copies));
    }

    #[test]
    fn demo_twice_collides() {
        let mut catalog = Catalog::new();
        load_demo(&mut catalog).unwrap();
        let err = load_demo(&mut catalog).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateKey { kind: EntityKind::Book, key: DEMO_BOOKS[0].0.into() }
        );
    }
}
