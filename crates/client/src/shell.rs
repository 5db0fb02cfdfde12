#![forbid(unsafe_code)]

//! Line-oriented terminal front end over the state machine.

use crate::render::render;
use crate::state::{Command, FormField, UiEvent, UiState, update};
use crate::transport::ApiClient;
use bb_core::board::Board;
use bb_core::ids::parse_leading_int;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

pub const HELP: &str = "\
commands:
  board free|notice      switch board
  search [keyword]       filter titles (empty clears)
  page N | prev | next   move between pages
  open ID                show a post
  new | edit | cancel    open or leave the form
  set board|title|author|content TEXT   fill the form (\\n for newlines)
  save                   submit the form
  delete                 delete the open post
  show | help | quit";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShellInput {
    Event(UiEvent),
    Show,
    Help,
    Quit,
    Nothing,
}

pub fn parse_line(line: &str) -> Result<ShellInput, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let event = match word {
        "" => return Ok(ShellInput::Nothing),
        "show" | "ls" => return Ok(ShellInput::Show),
        "help" | "?" => return Ok(ShellInput::Help),
        "quit" | "exit" | "q" => return Ok(ShellInput::Quit),
        "board" => match Board::from_code(rest) {
            Some(board) => UiEvent::SwitchBoard(board),
            None => return Err(format!("unknown board `{rest}` (free or notice)")),
        },
        "search" => UiEvent::Search(rest.to_string()),
        "page" => UiEvent::GoToPage(number(rest)?),
        "prev" => UiEvent::PrevPage,
        "next" => UiEvent::NextPage,
        "open" => UiEvent::SelectPost(number(rest)?),
        "new" => UiEvent::NewPost,
        "edit" => UiEvent::EditCurrent,
        "cancel" => UiEvent::Cancel,
        "save" => UiEvent::Submit,
        "delete" => UiEvent::DeleteRequested,
        "set" => {
            let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let field = match field {
                "board" => FormField::Board,
                "title" => FormField::Title,
                "author" => FormField::Author,
                "content" => FormField::Content,
                other => return Err(format!("unknown field `{other}`")),
            };
            UiEvent::EditField(field, value.trim_start().replace("\\n", "\n"))
        }
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(ShellInput::Event(event))
}

fn number(text: &str) -> Result<i64, String> {
    parse_leading_int(text).ok_or_else(|| format!("expected a number, got `{text}`"))
}

pub struct Shell<R, W> {
    state: UiState,
    client: ApiClient,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(client: ApiClient, input: R, output: W) -> Self {
        Self {
            state: UiState::default(),
            client,
            input,
            output,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn run(&mut self) -> io::Result<()> {
        self.dispatch(UiEvent::Started)?;
        self.show()?;
        loop {
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match parse_line(&line) {
                Ok(ShellInput::Event(event)) => {
                    self.dispatch(event)?;
                    self.show()?;
                }
                Ok(ShellInput::Show) => self.show()?,
                Ok(ShellInput::Help) => writeln!(self.output, "{HELP}")?,
                Ok(ShellInput::Quit) => return Ok(()),
                Ok(ShellInput::Nothing) => {}
                Err(message) => writeln!(self.output, "{message}")?,
            }
        }
    }

    /// Feeds `event` through the state machine and keeps running the resulting
    /// commands until none are left.
    pub fn dispatch(&mut self, event: UiEvent) -> io::Result<()> {
        let mut events = VecDeque::from([event]);
        while let Some(event) = events.pop_front() {
            for command in update(&mut self.state, event) {
                match command {
                    Command::Alert(message) => writeln!(self.output, "! {message}")?,
                    Command::ConfirmDelete(id) => {
                        write!(self.output, "Delete post #{id}? [y/N] ")?;
                        self.output.flush()?;
                        let answer = self.read_line()?.unwrap_or_default();
                        if matches!(answer.trim(), "y" | "Y" | "yes") {
                            events.push_back(UiEvent::DeleteConfirmed(id));
                        }
                    }
                    other => {
                        if let Some(next) = self.client.execute(&other) {
                            events.push_back(next);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn show(&mut self) -> io::Result<()> {
        write!(self.output, "{}", render(&self.state))
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
