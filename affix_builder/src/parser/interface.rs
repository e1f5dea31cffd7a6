use terminal_size::terminal_size;

/// Where the parser writes warnings, validator messages and help.
pub(crate) trait UserInterface {
    fn print(&self, message: String);

    /// Whether the output reaches a terminal (and so may be coloured).
    fn is_terminal(&self) -> bool;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Stream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Default)]
pub(crate) struct ConsoleInterface {
    stream: Stream,
}

impl ConsoleInterface {
    pub(crate) fn new(stream: Stream) -> Self {
        Self { stream }
    }
}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        match self.stream {
            Stream::Stdout => println!("{message}"),
            Stream::Stderr => eprintln!("{message}"),
        }
    }

    fn is_terminal(&self) -> bool {
        match self.stream {
            Stream::Stdout => terminal_size().is_some(),
            Stream::Stderr => stderr_size().is_some(),
        }
    }
}

#[cfg(unix)]
fn stderr_size() -> Option<(terminal_size::Width, terminal_size::Height)> {
    use std::os::unix::io::AsRawFd;
    terminal_size::terminal_size_using_fd(std::io::stderr().as_raw_fd())
}

#[cfg(windows)]
fn stderr_size() -> Option<(terminal_size::Width, terminal_size::Height)> {
    use std::os::windows::io::AsRawHandle;
    terminal_size::terminal_size_using_handle(std::io::stderr().as_raw_handle())
}

#[cfg(not(any(unix, windows)))]
fn stderr_size() -> Option<(terminal_size::Width, terminal_size::Height)> {
    None
}

#[cfg(any(test, feature = "unit_test"))]
pub(crate) mod util {
    use crate::parser::UserInterface;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Records everything the parser prints, instead of writing it out.
    /// Clones share the same record.
    #[derive(Clone, Default)]
    pub struct Transcript {
        lines: Rc<RefCell<Vec<String>>>,
        terminal: bool,
    }

    impl Transcript {
        /// A transcript which claims to be a terminal (so help is coloured by default).
        pub fn terminal() -> Self {
            Self {
                lines: Rc::default(),
                terminal: true,
            }
        }

        /// The lines printed so far.
        pub fn lines(&self) -> Vec<String> {
            self.lines.borrow().clone()
        }

        /// The lines printed so far, joined by newlines.
        pub fn message(&self) -> String {
            self.lines.borrow().join("\n")
        }

        /// Forget the lines printed so far.
        pub fn clear(&self) {
            self.lines.borrow_mut().clear();
        }
    }

    impl UserInterface for Transcript {
        fn print(&self, message: String) {
            self.lines.borrow_mut().push(message);
        }

        fn is_terminal(&self) -> bool {
            self.terminal
        }
    }
}
