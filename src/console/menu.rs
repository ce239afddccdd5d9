//! Main menu entries and their numeric codes.

/// One selectable line of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    SearchBooks,
    UpdateBook,
    DeleteBook,
    ListBooks,
    AddMember,
    UpdateMember,
    DeleteMember,
    ListMembers,
    BorrowBook,
    ReturnBook,
    Exit,
}

impl MenuChoice {
    /// Map the typed menu number to a choice. Surrounding whitespace is
    /// ignored; anything outside `0..=11` is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let choice = match input.trim() {
            "1" => MenuChoice::AddBook,
            "2" => MenuChoice::SearchBooks,
            "3" => MenuChoice::UpdateBook,
            "4" => MenuChoice::DeleteBook,
            "5" => MenuChoice::ListBooks,
            "6" => MenuChoice::AddMember,
            "7" => MenuChoice::UpdateMember,
            "8" => MenuChoice::DeleteMember,
            "9" => MenuChoice::ListMembers,
            "10" => MenuChoice::BorrowBook,
            "11" => MenuChoice::ReturnBook,
            "0" => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }

    /// Operation name used in log events.
    pub fn operation(self) -> &'static str {
        match self {
            MenuChoice::AddBook => "add_book",
            MenuChoice::SearchBooks => "search_books",
            MenuChoice::UpdateBook => "update_book",
            MenuChoice::DeleteBook => "delete_book",
            MenuChoice::ListBooks => "list_books",
            MenuChoice::AddMember => "add_member",
            MenuChoice::UpdateMember => "update_member",
            MenuChoice::DeleteMember => "delete_member",
            MenuChoice::ListMembers => "list_members",
            MenuChoice::BorrowBook => "borrow_book",
            MenuChoice::ReturnBook => "return_book",
            MenuChoice::Exit => "exit",
        }
    }
}

const RULE: &str = "============================================================";

/// The full menu text, ready to print.
pub fn render() -> String {
    format!(
        "\n{RULE}\n\
         LIBRARY CATALOG\n\
         {RULE}\n\
         \n\
         BOOK OPERATIONS:\n  \
           1. Add New Book\n  \
           2. Search Books\n  \
           3. Update Book\n  \
           4. Delete Book\n  \
           5. Display All Books\n\
         \n\
         MEMBER OPERATIONS:\n  \
           6. Add New Member\n  \
           7. Update Member\n  \
           8. Delete Member\n  \
           9. Display All Members\n\
         \n\
         BORROW/RETURN OPERATIONS:\n  \
           10. Borrow Book\n  \
           11. Return Book\n\
         \n  \
           0. Exit System\n\
         {RULE}"
    )
}

/// Horizontal rule shared by the banners.
pub fn rule() -> &'static str {
    RULE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_number_maps_to_a_choice() {
        let parsed: Vec<_> = (0..=11).map(|n| MenuChoice::parse(&n.to_string())).collect();
        assert!(parsed.iter().all(Option::is_some));
        assert_eq!(parsed[0], Some(MenuChoice::Exit));
        assert_eq!(parsed[10], Some(MenuChoice::BorrowBook));
    }

    #[test]
    fn out_of_range_and_garbage_rejected() {
        for bad in ["12", "-1", "", "one", "01 2"] {
            assert_eq!(MenuChoice::parse(bad), None, "{bad:?} should not parse");
        }
        assert_eq!(MenuChoice::parse(" 4 "), Some(MenuChoice::DeleteBook));
    }

    #[test]
    fn menu_lists_every_entry() {
        let menu = render();
        for label in ["1. Add New Book", "9. Display All Members", "11. Return Book", "0. Exit System"] {
            assert!(menu.contains(label), "menu missing {label}");
        }
    }
}
