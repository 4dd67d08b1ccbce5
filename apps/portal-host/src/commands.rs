//! stdin 命令解析。

use domain::{MetadataDocument, MetadataField, Signal, SET_ITEM_METADATA, Timespan};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
    #[error("invalid field assignment: {0}")]
    InvalidField(String),
    #[error("invalid model id: {0}")]
    InvalidId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Visit(String),
    Modify {
        item_id: String,
        fields: Vec<(String, String)>,
    },
    Widgets,
    Blocks {
        tag: String,
        theme: Option<String>,
    },
    Users,
    Models,
    ModelAdd {
        external_id: String,
        name: String,
    },
    ModelDelete(Vec<u64>),
    Quit,
}

impl Command {
    /// 转换为待发布的信号；非信号命令返回 None。
    pub fn to_signal(&self) -> Option<Signal> {
        match self {
            Command::Visit(item_id) => Some(Signal::item_visited(item_id.as_str())),
            Command::Modify { item_id, fields } => {
                let fields = fields
                    .iter()
                    .map(|(name, value)| MetadataField::new(name.as_str(), value.as_str()))
                    .collect();
                Some(Signal::PreModify {
                    item_id: item_id.clone(),
                    method: SET_ITEM_METADATA.to_string(),
                    metadata_document: MetadataDocument::new(vec![Timespan::whole_item(fields)]),
                })
            }
            _ => None,
        }
    }
}

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut parts = line.split_whitespace();
    let keyword = parts.next().ok_or(CommandError::Empty)?;
    match keyword {
        "visit" => {
            let item_id = parts.next().ok_or(CommandError::MissingArgument("item_id"))?;
            Ok(Command::Visit(item_id.to_string()))
        }
        "modify" => {
            let item_id = parts.next().ok_or(CommandError::MissingArgument("item_id"))?;
            let fields = parts
                .map(|assignment| match assignment.split_once('=') {
                    Some((name, value)) if !name.is_empty() => {
                        Ok((name.to_string(), value.to_string()))
                    }
                    _ => Err(CommandError::InvalidField(assignment.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()?;
            if fields.is_empty() {
                return Err(CommandError::MissingArgument("field=value"));
            }
            Ok(Command::Modify {
                item_id: item_id.to_string(),
                fields,
            })
        }
        "widgets" => Ok(Command::Widgets),
        "blocks" => {
            let tag = parts.next().ok_or(CommandError::MissingArgument("tag"))?;
            Ok(Command::Blocks {
                tag: tag.to_string(),
                theme: parts.next().map(str::to_string),
            })
        }
        "users" => Ok(Command::Users),
        "models" => Ok(Command::Models),
        "model" => match parts.next() {
            Some("add") => {
                let external_id = parts
                    .next()
                    .ok_or(CommandError::MissingArgument("external_id"))?;
                let name = parts.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(CommandError::MissingArgument("name"));
                }
                Ok(Command::ModelAdd {
                    external_id: external_id.to_string(),
                    name,
                })
            }
            Some("delete") => {
                let ids = parts
                    .map(|raw| {
                        raw.parse::<u64>()
                            .map_err(|_| CommandError::InvalidId(raw.to_string()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Command::ModelDelete(ids))
            }
            Some(other) => Err(CommandError::Unknown(format!("model {other}"))),
            None => Err(CommandError::MissingArgument("add|delete")),
        },
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_visit_and_quit() {
        assert_eq!(
            parse_command("visit VX-1"),
            Ok(Command::Visit("VX-1".to_string()))
        );
        assert_eq!(parse_command("  quit "), Ok(Command::Quit));
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(
            parse_command("visit"),
            Err(CommandError::MissingArgument("item_id"))
        );
    }

    #[test]
    fn modify_builds_whole_item_document() {
        let command = parse_command("modify VX-2 title=Sunset genre=").expect("parse");
        let signal = command.to_signal().expect("signal");
        match signal {
            Signal::PreModify {
                item_id,
                method,
                metadata_document,
            } => {
                assert_eq!(item_id, "VX-2");
                assert_eq!(method, SET_ITEM_METADATA);
                let span = metadata_document.whole_item_span().expect("span");
                assert_eq!(span.fields.len(), 2);
                assert_eq!(span.fields[1].first_value(), Some(""));
            }
            other => panic!("unexpected signal: {other:?}"),
        }
        assert_eq!(
            parse_command("modify VX-2 title"),
            Err(CommandError::InvalidField("title".to_string()))
        );
    }

    #[test]
    fn parses_model_commands() {
        assert_eq!(
            parse_command("model add EXT-1 Archive rule"),
            Ok(Command::ModelAdd {
                external_id: "EXT-1".to_string(),
                name: "Archive rule".to_string(),
            })
        );
        assert_eq!(
            parse_command("model delete 1 2"),
            Ok(Command::ModelDelete(vec![1, 2]))
        );
        assert_eq!(
            parse_command("model delete x"),
            Err(CommandError::InvalidId("x".to_string()))
        );
        assert!(parse_command("widgets").expect("parse").to_signal().is_none());
    }
}
