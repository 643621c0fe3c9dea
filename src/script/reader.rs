use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::foundation::error::{KeysceneError, KeysceneResult};
use crate::foundation::math::Axis;
use crate::script::command::Command;
use crate::script::symbols::{Material, Reflectance, SymbolTable};

/// A parsed scene script: the command list plus the materials it declares.
#[derive(Clone, Debug, PartialEq)]
pub struct Script {
    pub commands: Vec<Command>,
    pub symbols: SymbolTable,
}

#[derive(serde::Deserialize)]
struct ScriptDef {
    commands: Vec<Command>,
    #[serde(default)]
    materials: BTreeMap<String, Material>,
}

impl Script {
    /// Wrap an already-built command list with the default symbol table.
    pub fn from_commands(commands: Vec<Command>) -> Self {
        Self {
            commands,
            symbols: SymbolTable::new(),
        }
    }

    /// Read a script from disk. `.json` files are read as a command list, everything else
    /// as script text.
    pub fn from_path(path: impl AsRef<Path>) -> KeysceneResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            KeysceneError::validation(format!("open script '{}': {e}", path.display()))
        })?;
        let mut r = BufReader::new(f);
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_reader(r)
        } else {
            let mut src = String::new();
            r.read_to_string(&mut src).map_err(|e| {
                KeysceneError::validation(format!("read script '{}': {e}", path.display()))
            })?;
            Self::parse(&src)
        }
    }

    /// Parse a JSON document `{"commands": [...], "materials": {...}}`.
    pub fn from_json_reader<R: Read>(r: R) -> KeysceneResult<Self> {
        let def: ScriptDef = serde_json::from_reader(r)
            .map_err(|e| KeysceneError::parse(e.line(), format!("script JSON: {e}")))?;
        let mut symbols = SymbolTable::new();
        for (name, material) in def.materials {
            symbols.define(name, material);
        }
        Ok(Self {
            commands: def.commands,
            symbols,
        })
    }

    /// Parse line-oriented script text.
    pub fn parse(src: &str) -> KeysceneResult<Self> {
        let mut commands = Vec::new();
        let mut symbols = SymbolTable::new();

        for (idx, raw) in src.lines().enumerate() {
            let line = idx + 1;
            let tokens: Vec<&str> = strip_comment(raw).split_whitespace().collect();
            let Some((&op, args)) = tokens.split_first() else {
                continue;
            };
            let p = LineParser { line, op, args };

            if op == "constants" {
                let (name, material) = p.constants()?;
                symbols.define(name, material);
                continue;
            }
            commands.push(p.command()?);
        }

        Ok(Self { commands, symbols })
    }
}

fn strip_comment(line: &str) -> &str {
    let end = [line.find("//"), line.find('#')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(line.len());
    &line[..end]
}

struct LineParser<'a> {
    line: usize,
    op: &'a str,
    args: &'a [&'a str],
}

impl LineParser<'_> {
    fn err(&self, msg: impl std::fmt::Display) -> KeysceneError {
        KeysceneError::parse(self.line, format!("{}: {msg}", self.op))
    }

    fn number(&self, tok: &str) -> KeysceneResult<f64> {
        tok.parse::<f64>()
            .map_err(|_| self.err(format!("expected a number, got '{tok}'")))
    }

    fn numbers<const N: usize>(&self, toks: &[&str]) -> KeysceneResult<[f64; N]> {
        if toks.len() != N {
            return Err(self.err(format!(
                "expected {N} numeric arguments, got {}",
                toks.len()
            )));
        }
        let mut out = [0.0; N];
        for (slot, tok) in out.iter_mut().zip(toks) {
            *slot = self.number(tok)?;
        }
        Ok(out)
    }

    fn no_args(&self) -> KeysceneResult<()> {
        if self.args.is_empty() {
            Ok(())
        } else {
            Err(self.err("takes no arguments"))
        }
    }

    fn single(&self) -> KeysceneResult<&str> {
        match self.args {
            [one] => Ok(one),
            _ => Err(self.err("expected exactly one argument")),
        }
    }

    /// Splits an optional leading material name off a shape's arguments.
    fn shape_args(&self) -> (Option<String>, &[&str]) {
        match self.args.split_first() {
            Some((first, rest)) if first.parse::<f64>().is_err() => {
                (Some((*first).to_string()), rest)
            }
            _ => (None, self.args),
        }
    }

    /// Splits an optional trailing knob name off a transform's arguments.
    fn knob_args(&self, numeric: usize) -> KeysceneResult<(&[&str], Option<String>)> {
        match self.args.len() {
            n if n == numeric => Ok((self.args, None)),
            n if n == numeric + 1 => {
                let knob = self.args[numeric];
                if knob.parse::<f64>().is_ok() {
                    return Err(self.err(format!("knob name expected, got '{knob}'")));
                }
                Ok((&self.args[..numeric], Some(knob.to_string())))
            }
            n => Err(self.err(format!(
                "expected {numeric} arguments and an optional knob, got {n}"
            ))),
        }
    }

    fn frame(&self, tok: &str) -> KeysceneResult<i64> {
        tok.parse::<i64>()
            .map_err(|_| self.err(format!("expected an integer frame, got '{tok}'")))
    }

    fn constants(&self) -> KeysceneResult<(String, Material)> {
        let Some((name, rest)) = self.args.split_first() else {
            return Err(self.err("missing material name"));
        };
        let [ar, dr, sr, ag, dg, sg, ab, db, sb] = self.numbers::<9>(rest)?;
        Ok((
            (*name).to_string(),
            Material {
                red: Reflectance::new(ar, dr, sr),
                green: Reflectance::new(ag, dg, sg),
                blue: Reflectance::new(ab, db, sb),
            },
        ))
    }

    fn command(&self) -> KeysceneResult<Command> {
        let cmd = match self.op {
            "box" => {
                let (constants, rest) = self.shape_args();
                let [x, y, z, w, h, d] = self.numbers::<6>(rest)?;
                Command::Box {
                    origin: [x, y, z],
                    dims: [w, h, d],
                    constants,
                }
            }
            "sphere" => {
                let (constants, rest) = self.shape_args();
                let [x, y, z, r] = self.numbers::<4>(rest)?;
                Command::Sphere {
                    center: [x, y, z],
                    radius: r,
                    constants,
                }
            }
            "torus" => {
                let (constants, rest) = self.shape_args();
                let [x, y, z, r0, r1] = self.numbers::<5>(rest)?;
                Command::Torus {
                    center: [x, y, z],
                    minor_radius: r0,
                    major_radius: r1,
                    constants,
                }
            }
            "line" => {
                // Lines always draw in the fixed edge colour; a material name is accepted and dropped.
                let (_, rest) = self.shape_args();
                let [x0, y0, z0, x1, y1, z1] = self.numbers::<6>(rest)?;
                Command::Line {
                    p0: [x0, y0, z0],
                    p1: [x1, y1, z1],
                }
            }
            "move" => {
                let (nums, knob) = self.knob_args(3)?;
                Command::Move {
                    offset: self.numbers::<3>(nums)?,
                    knob,
                }
            }
            "scale" => {
                let (nums, knob) = self.knob_args(3)?;
                Command::Scale {
                    factors: self.numbers::<3>(nums)?,
                    knob,
                }
            }
            "rotate" => {
                let (nums, knob) = self.knob_args(2)?;
                let axis = Axis::parse(nums[0])
                    .ok_or_else(|| self.err(format!("unknown axis '{}'", nums[0])))?;
                Command::Rotate {
                    axis,
                    degrees: self.number(nums[1])?,
                    knob,
                }
            }
            "push" => {
                self.no_args()?;
                Command::Push
            }
            "pop" => {
                self.no_args()?;
                Command::Pop
            }
            "display" => {
                self.no_args()?;
                Command::Display
            }
            "save" => Command::Save {
                path: self.single()?.into(),
            },
            "frames" => {
                let tok = self.single()?;
                let count = tok
                    .parse::<u64>()
                    .map_err(|_| self.err(format!("expected a frame count, got '{tok}'")))?;
                Command::Frames { count }
            }
            "basename" => Command::Basename {
                name: self.single()?.to_string(),
            },
            "vary" => match self.args {
                [knob, f0, f1, v0, v1] => Command::Vary {
                    knob: (*knob).to_string(),
                    start_frame: self.frame(f0)?,
                    end_frame: self.frame(f1)?,
                    start_value: self.number(v0)?,
                    end_value: self.number(v1)?,
                },
                _ => return Err(self.err("expected: vary KNOB F0 F1 V0 V1")),
            },
            other => {
                return Err(KeysceneError::parse(
                    self.line,
                    format!("unknown command '{other}'"),
                ));
            }
        };
        Ok(cmd)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/script/reader.rs"]
mod tests;
