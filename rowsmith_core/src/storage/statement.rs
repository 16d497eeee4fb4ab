//! Reads back the statement shapes `ddl` emits.
//!
//! This is not a SQL parser: anything outside CREATE TABLE, DROP TABLE,
//! `INSERT .. VALUES (@p..)` and `SELECT * FROM .. [ORDER BY col ASC|DESC]`
//! is rejected.

use crate::ddl::SortOrder;
use crate::schema::ColumnDefinition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    Word(String),
    Ident(String),
    Param(String),
    Punct(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Statement {
    CreateTable {
        table: String,
        columns: Vec<ColumnDefinition>,
    },
    DropTable {
        table: String,
    },
    Insert {
        table: String,
        columns: Vec<String>,
        params: Vec<String>,
    },
    SelectAll {
        table: String,
        order_by: Option<(String, SortOrder)>,
    },
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, String> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut it = input.chars().peekable();

    while let Some(ch) = it.next() {
        match ch {
            c if c.is_whitespace() => {}

            '[' => {
                let mut ident = String::new();
                loop {
                    match it.next() {
                        Some(']') => {
                            if let Some(']') = it.peek().copied() {
                                it.next();
                                ident.push(']');
                            } else {
                                break;
                            }
                        }
                        Some(c) => ident.push(c),
                        None => return Err("Unclosed identifier bracket ([) in statement".to_string()),
                    }
                }
                tokens.push(Token::Ident(ident));
            }

            '@' => {
                let mut name = String::from("@");
                while let Some(c) = it.peek().copied() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        name.push(c);
                        it.next();
                    } else {
                        break;
                    }
                }
                if name.len() == 1 {
                    return Err("Parameter marker '@' must be followed by a name".to_string());
                }
                tokens.push(Token::Param(name));
            }

            '(' | ')' | ',' | ';' | '*' => tokens.push(Token::Punct(ch)),

            c if c.is_alphanumeric() || c == '_' => {
                let mut word = String::from(c);
                while let Some(c) = it.peek().copied() {
                    if c.is_alphanumeric() || c == '_' {
                        word.push(c);
                        it.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token::Word(word));
            }

            other => return Err(format!("Incorrect syntax near '{other}'")),
        }
    }

    if let Some(Token::Punct(';')) = tokens.last() {
        tokens.pop();
    }
    Ok(tokens)
}

pub(crate) fn parse(sql: &str) -> Result<Statement, String> {
    let tokens = tokenize(sql)?;
    let mut cur = Cursor { tokens, pos: 0 };

    let stmt = if cur.eat_kw("create") {
        cur.expect_kw("table")?;
        parse_create(&mut cur)?
    } else if cur.eat_kw("drop") {
        cur.expect_kw("table")?;
        Statement::DropTable { table: cur.name()? }
    } else if cur.eat_kw("insert") {
        cur.expect_kw("into")?;
        parse_insert(&mut cur)?
    } else if cur.eat_kw("select") {
        cur.expect_punct('*')?;
        cur.expect_kw("from")?;
        let table = cur.name()?;
        let order_by = if cur.eat_kw("order") {
            cur.expect_kw("by")?;
            let column = cur.name()?;
            let order = if cur.eat_kw("desc") {
                SortOrder::Descending
            } else {
                cur.eat_kw("asc");
                SortOrder::Ascending
            };
            Some((column, order))
        } else {
            None
        };
        Statement::SelectAll { table, order_by }
    } else {
        return Err("Unsupported statement. Expected CREATE TABLE, DROP TABLE, INSERT or SELECT".to_string());
    };

    if cur.pos < cur.tokens.len() {
        return Err(format!("Unexpected trailing input near {:?}", cur.tokens[cur.pos]));
    }
    Ok(stmt)
}

fn parse_create(cur: &mut Cursor) -> Result<Statement, String> {
    let table = cur.name()?;
    cur.expect_punct('(')?;
    let mut columns: Vec<ColumnDefinition> = Vec::new();
    loop {
        columns.push(parse_column(cur)?);
        if cur.eat_punct(',') {
            continue;
        }
        cur.expect_punct(')')?;
        break;
    }
    Ok(Statement::CreateTable { table, columns })
}

fn parse_column(cur: &mut Cursor) -> Result<ColumnDefinition, String> {
    let name = cur.name()?;
    let data_type = parse_type(cur)?;

    let mut is_primary_key = false;
    let mut is_auto_increment = false;
    let mut nullable: Option<bool> = None;
    loop {
        if cur.eat_kw("primary") {
            cur.expect_kw("key")?;
            is_primary_key = true;
        } else if cur.eat_kw("identity") {
            if cur.eat_punct('(') {
                cur.word()?;
                cur.expect_punct(',')?;
                cur.word()?;
                cur.expect_punct(')')?;
            }
            is_auto_increment = true;
        } else if cur.eat_kw("not") {
            cur.expect_kw("null")?;
            nullable = Some(false);
        } else if cur.eat_kw("null") {
            nullable = Some(true);
        } else {
            break;
        }
    }

    Ok(ColumnDefinition {
        name,
        data_type,
        is_primary_key,
        is_auto_increment,
        is_nullable: !is_primary_key && nullable.unwrap_or(true),
    })
}

/// Collects type tokens up to the first constraint keyword, `,` or `)` at
/// depth zero, so `decimal(10, 2)` reads back as `decimal(10,2)`.
fn parse_type(cur: &mut Cursor) -> Result<String, String> {
    let mut out = String::new();
    let mut depth = 0usize;
    while let Some(tok) = cur.peek() {
        match tok {
            Token::Word(w)
                if depth == 0
                    && ["primary", "identity", "not", "null"]
                        .iter()
                        .any(|kw| w.eq_ignore_ascii_case(kw)) =>
            {
                break;
            }
            Token::Word(w) => {
                if !out.is_empty() && !out.ends_with('(') && !out.ends_with(',') {
                    out.push(' ');
                }
                out.push_str(w);
            }
            Token::Punct('(') if !out.is_empty() => {
                depth += 1;
                out.push('(');
            }
            Token::Punct(')') if depth > 0 => {
                depth -= 1;
                out.push(')');
            }
            Token::Punct(',') if depth > 0 => out.push(','),
            Token::Punct(',') | Token::Punct(')') => break,
            other => return Err(format!("Incorrect syntax in data type near {other:?}")),
        }
        cur.pos += 1;
    }
    if out.is_empty() || depth > 0 {
        return Err("Column definition is missing a data type".to_string());
    }
    Ok(out)
}

fn parse_insert(cur: &mut Cursor) -> Result<Statement, String> {
    let table = cur.name()?;
    cur.expect_punct('(')?;
    let mut columns = vec![cur.name()?];
    while cur.eat_punct(',') {
        columns.push(cur.name()?);
    }
    cur.expect_punct(')')?;
    cur.expect_kw("values")?;
    cur.expect_punct('(')?;
    let mut params = vec![cur.param()?];
    while cur.eat_punct(',') {
        params.push(cur.param()?);
    }
    cur.expect_punct(')')?;
    Ok(Statement::Insert {
        table,
        columns,
        params,
    })
}

struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat_kw(&mut self, kw: &str) -> bool {
        match self.peek() {
            Some(Token::Word(w)) if w.eq_ignore_ascii_case(kw) => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn expect_kw(&mut self, kw: &str) -> Result<(), String> {
        if self.eat_kw(kw) {
            Ok(())
        } else {
            Err(format!("Expected keyword '{}'", kw.to_uppercase()))
        }
    }

    fn eat_punct(&mut self, p: char) -> bool {
        if let Some(Token::Punct(c)) = self.peek() {
            if *c == p {
                self.pos += 1;
                return true;
            }
        }
        false
    }

    fn expect_punct(&mut self, p: char) -> Result<(), String> {
        if self.eat_punct(p) {
            Ok(())
        } else {
            Err(format!("Expected '{p}'"))
        }
    }

    fn word(&mut self) -> Result<String, String> {
        match self.bump() {
            Some(Token::Word(w)) => Ok(w),
            other => Err(format!("Expected a word but found {other:?}")),
        }
    }

    fn name(&mut self) -> Result<String, String> {
        match self.bump() {
            Some(Token::Ident(n)) | Some(Token::Word(n)) => Ok(n),
            other => Err(format!("Expected an object name but found {other:?}")),
        }
    }

    fn param(&mut self) -> Result<String, String> {
        match self.bump() {
            Some(Token::Param(p)) => Ok(p),
            _ => Err("VALUES accepts only named parameters such as @p1".to_string()),
        }
    }
}
