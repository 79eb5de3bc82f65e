//! Helper library for parsing command line arguments

#![deny(clippy::panic)]
#![warn(missing_docs)]

pub use lexopt;

/// An argument that can go alongside a command line option, or stand on its own as a positional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Value<'a> {
    /// should be uppercase
    pub name: &'a str,
    /// `[NAME]` instead of `<NAME>`
    pub optional: bool,
    /// `...`
    pub variadic: bool,
}

impl std::fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = self.name;
        let (open, close) = if self.optional {
            ('[', ']')
        } else {
            ('<', '>')
        };
        let trail = if self.variadic { "..." } else { "" };
        write!(f, "{open}{name}{close}{trail}")
    }
}

impl<'a> Value<'a> {
    /// Construct a new [`Value`] with a name, setting all other fields to their defaults.
    ///
    /// # Convention
    ///
    /// `name` should be all uppercase and preferably one word.
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            optional: false,
            variadic: false,
        }
    }

    /// Mark the value as optional (wrap with `[]` instead of `<>`).
    pub const fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Mark the value as variadic (append with `...`).
    pub const fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    /// The length of the display string in bytes.
    #[allow(
        clippy::len_without_is_empty,
        reason = "`Value` will never be empty, because it always contains either `[]` or `<>`"
    )]
    pub const fn len(&self) -> usize {
        self.name.len()
            + if self.optional { "[]" } else { "<>" }.len()
            + if self.variadic { "..." } else { "" }.len()
    }
}

/// An optional argument, or a positional one when neither [`short`](Self::short)
/// nor [`long`](Self::long) is set.
#[derive(Debug, Default)]
pub struct RunOption<'l, 'v, 'm> {
    /// The [`Short`](lexopt::Arg::Short) option.
    pub short: Option<char>,

    /// The [`Long`](lexopt::Arg::Long) option.
    pub long: Option<&'l str>,

    /// An optional or required [`Value`]
    /// expected to follow [`long`](Self::long) or [`short`](Self::short)
    pub val: Option<Value<'v>>,

    /// The option's brief help description
    pub msg: &'m str,
}

impl<'l, 'v, 'm> RunOption<'l, 'v, 'm> {
    /// Construct a new [`RunOption`] from its help description.
    pub const fn new(msg: &'m str) -> Self {
        Self {
            short: None,
            long: None,
            val: None,
            msg,
        }
    }

    /// Add a [`Short`](lexopt::Arg::Short) option.
    pub const fn with_short(mut self, ch: char) -> Self {
        self.short = Some(ch);
        self
    }

    /// Add a [`Long`](lexopt::Arg::Long) option.
    pub const fn with_long(mut self, s: &'l str) -> Self {
        self.long = Some(s);
        self
    }

    /// Add a [`Value`] to the option.
    pub const fn with_value(mut self, val: Value<'v>) -> Self {
        self.val = Some(val);
        self
    }

    /// Whether this is a positional argument rather than a flag.
    pub const fn is_positional(&self) -> bool {
        self.short.is_none() && self.long.is_none()
    }
}

/// ANSI escapes used by [`write_help`]. All empty when unstyled.
struct Palette {
    reset: &'static str,
    name: &'static str,
    lit: &'static str,
    header: &'static str,
}

impl Palette {
    const STYLED: Self = Self {
        reset: "\x1B[0m",
        name: "\x1B[36m",
        lit: "\x1B[1;96m",
        header: "\x1B[1;92m",
    };

    const PLAIN: Self = Self {
        reset: "",
        name: "",
        lit: "",
        header: "",
    };
}

/// Write the help message to a [`Write`](std::io::Write) implementor.
///
/// `usages[i][j].0`: If true, style as literal text. Otherwise, style as a placeholder.
///
/// Positional entries of `options` are listed under `Arguments:`, the rest under `Options:`.
///
/// **See also:** [`print_help`]
pub fn write_help<W>(
    mut w: W,
    bin_name: &str,
    usages: &[&[(bool, &str)]],
    options: &[RunOption<'_, '_, '_>],
    styled: bool,
) -> std::io::Result<()>
where
    W: std::io::Write,
{
    let Palette {
        reset,
        name,
        lit,
        header,
    } = if styled {
        Palette::STYLED
    } else {
        Palette::PLAIN
    };

    let (positionals, flags): (Vec<_>, Vec<_>) =
        options.iter().partition(|opt| opt.is_positional());

    let longest_short = if flags.iter().any(|opt| opt.short.is_some()) {
        "-*".len()
    } else {
        0
    };

    let longest_long = flags
        .iter()
        .filter_map(|opt| opt.long)
        .map(|x| "--".len() + x.len())
        .max()
        .unwrap_or(0);

    let longest_val = flags
        .iter()
        .filter_map(|opt| opt.val)
        .map(|x| x.len())
        .max()
        .unwrap_or(0);

    write!(w, "{header}Usage: {reset}")?;
    for usage in usages {
        write!(w, "{lit}{bin_name}{reset}")?;
        for (bold, text) in *usage {
            write!(w, " {}{text}{reset}", if *bold { lit } else { name })?;
        }
        writeln!(w)?;
        write!(w, "{:indent$}", "", indent = "Usage: ".len())?;
    }
    writeln!(w)?;

    if !positionals.is_empty() {
        let longest_positional = positionals
            .iter()
            .filter_map(|opt| opt.val)
            .map(|x| x.len())
            .max()
            .unwrap_or(0);

        writeln!(w, "{header}Arguments:{reset}")?;
        for arg in &positionals {
            let val = arg.val.map(|v| v.to_string()).unwrap_or_default();
            let msg = arg.msg;
            writeln!(
                w,
                "  {name}{val:<width$}{reset}  {msg}",
                width = longest_positional,
            )?;
        }
        writeln!(w)?;
    }

    writeln!(w, "{header}Options:{reset}")?;
    for option in &flags {
        let comma = if option.short.is_some() && option.long.is_some() {
            ','
        } else {
            ' '
        };
        let short = option.short.map(|ch| format!("-{ch}")).unwrap_or_default();
        let long = option.long.map(|s| format!("--{s}")).unwrap_or_default();
        let val = option.val.map(|v| v.to_string()).unwrap_or_default();
        let msg = option.msg;
        writeln!(
            w,
            "  {lit}{short:>short_width$}{reset}{comma} {lit}{long:<long_width$}{reset} {name}{val:<val_width$}{reset}  {msg}",
            short_width = longest_short,
            long_width = longest_long,
            val_width = longest_val,
        )?;
    }

    Ok(())
}

/// [`print`] version of [`write_help`]. Styled only when stdout is a terminal.
pub fn print_help(
    bin_name: &str,
    usages: &[&[(bool, &str)]],
    options: &[RunOption<'_, '_, '_>],
) -> std::io::Result<()> {
    use std::io::IsTerminal;

    let stdout = std::io::stdout();
    let styled = stdout.is_terminal();
    write_help(stdout.lock(), bin_name, usages, options, styled)
}

/// Parse an argument with [`lexopt`], automatically generating help text for [`write_help`]/[`print_help`].
///
/// Each arm is written as `(-'s', --"long" <VALUE>)`, `(-'s')`, `(--"long" [VALUE])`, etc.
/// A lone identifier such as `(COMMAND)` binds a positional value.
#[macro_export]
macro_rules! parse_arg {
    // help text is optional
    (@[] $($pattern:tt)*) => {
        $crate::parse_arg!(@[""] $($pattern)*)
    };
    // long-only arms must precede the short arms: `--"x"` would otherwise be read as `-` followed by the literal `-"x"`
    (@[$msg:expr] --$long:literal $(<$val:ident>)? $([$opt_val:ident])?) => {
        $crate::RunOption::new($msg)
            .with_long($long)
            $(.with_value($crate::Value::new(stringify!($val))))?
            $(.with_value($crate::Value::new(stringify!($opt_val)).optional()))?
    };
    (@[$msg:expr] -$short:literal $(, --$long:literal)? $(<$val:ident>)? $([$opt_val:ident])?) => {
        $crate::RunOption::new($msg)
            .with_short($short)
            $(.with_long($long))?
            $(.with_value($crate::Value::new(stringify!($val))))?
            $(.with_value($crate::Value::new(stringify!($opt_val)).optional()))?
    };
    (@[$msg:expr] $value:ident) => {
        $crate::RunOption::new($msg)
            .with_value($crate::Value::new(stringify!($value)))
    };

    (# --$long:literal $(<$val:ident>)? $([$opt_val:ident])?) => {
        $crate::lexopt::prelude::Long($long)
    };
    (# -$short:literal $(, --$long:literal)? $(<$val:ident>)? $([$opt_val:ident])?) => {
        $crate::lexopt::prelude::Short($short) $(| $crate::lexopt::prelude::Long($long))?
    };
    (# $value:ident) => {
        $crate::lexopt::prelude::Value($value)
    };

    (%[$parser:ident, $expr:expr] --$long:literal <$val:ident>) => {
        {
            #[allow(non_snake_case)]
            let $val = $parser.value();
            $expr
        }
    };
    (%[$parser:ident, $expr:expr] --$long:literal [$opt_val:ident]) => {
        {
            #[allow(non_snake_case)]
            let $opt_val = $parser.optional_value();
            $expr
        }
    };
    (%[$parser:ident, $expr:expr] --$long:literal) => {
        $expr
    };
    (%[$parser:ident, $expr:expr] -$short:literal $(, --$long:literal)? <$val:ident>) => {
        {
            #[allow(non_snake_case)]
            let $val = $parser.value();
            $expr
        }
    };
    (%[$parser:ident, $expr:expr] -$short:literal $(, --$long:literal)? [$opt_val:ident]) => {
        {
            #[allow(non_snake_case)]
            let $opt_val = $parser.optional_value();
            $expr
        }
    };
    (%[$parser:ident, $expr:expr] -$short:literal $(, --$long:literal)?) => {
        $expr
    };
    (%[$parser:ident, $expr:expr] $value:ident) => {
        $expr
    };

    (
        options = $OPTIONS:ident;
        parser = $parser:ident;
        match $arg:ident {
            $(
                $(#[help = $msg:expr])?
                ($($pattern:tt)*) => $expr:expr,
            )*
            _ => $rest:expr $(,)?
        }
    ) => {
        static $OPTIONS: &[$crate::RunOption] = &[
            $($crate::parse_arg!(@[$($msg)?] $($pattern)*)),*
        ];
        match $arg {
            $(
                // positionals bind the uppercase value name
                #[allow(non_snake_case)]
                $crate::parse_arg!(# $($pattern)*) => $crate::parse_arg!(%[$parser, $expr] $($pattern)*),
            )*
            _ => $rest
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Parsed {
        store: Option<String>,
        key: Option<String>,
        json: bool,
        tag: Vec<Option<String>>,
        command: Option<String>,
    }

    #[deny(non_snake_case)]
    fn parse<const N: usize>(args: [&str; N]) -> (Parsed, &'static [RunOption<'static, 'static, 'static>]) {
        let mut parsed = Parsed::default();
        let mut options: &'static [RunOption] = &[];
        let mut parser = lexopt::Parser::from_args(args);
        while let Some(arg) = parser.next().unwrap() {
            parse_arg! {
                options = OPTIONS;
                parser = parser;
                match arg {
                    #[help = "Directory holding saved plans"]
                    ( -'d', --"store" <DIR> ) => parsed.store = Some(DIR.unwrap().into_string().unwrap()),

                    #[help = "Storage key"]
                    ( --"key" <KEY> ) => parsed.key = Some(KEY.unwrap().into_string().unwrap()),

                    #[help = "Print JSON"]
                    ( -'j' ) => parsed.json = true,

                    #[help = "Attach a tag"]
                    ( -'t', --"tag" [TAG] ) => parsed.tag.push(TAG.map(|s| s.into_string().unwrap())),

                    #[help = "What to do"]
                    ( COMMAND ) => parsed.command = Some(COMMAND.into_string().unwrap()),

                    _ => panic!("unexpected argument"),
                }
            }
            options = OPTIONS;
        }
        (parsed, options)
    }

    #[test]
    fn test_short_long_and_positional() {
        let (parsed, _) = parse(["show", "-d", "plans", "--key=spring", "-j", "-t", "--tag=exam"]);
        assert_eq!(
            parsed,
            Parsed {
                store: Some("plans".to_string()),
                key: Some("spring".to_string()),
                json: true,
                tag: vec![None, Some("exam".to_string())],
                command: Some("show".to_string()),
            }
        );
    }

    #[test]
    fn test_help_lists_arguments_and_options() {
        let (_, options) = parse(["-j"]);
        let mut out = Vec::new();
        write_help(
            &mut out,
            "planner",
            &[&[(false, "[OPTIONS]"), (false, "[COMMAND]")]],
            options,
            false,
        )
        .unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("Usage: planner [OPTIONS] [COMMAND]\n"));
        assert!(text.contains("Arguments:\n  <COMMAND>  What to do\n"), "{text}");
        assert!(text.contains("-d, --store <DIR>  Directory holding saved plans"), "{text}");
        assert!(text.contains("--key   <KEY>  Storage key"), "{text}");
        assert!(!text.contains('\x1B'), "plain help should carry no escapes");
    }

    #[test]
    fn test_value_display() {
        assert_eq!(Value::new("PATH").to_string(), "<PATH>");
        assert_eq!(Value::new("TAG").optional().to_string(), "[TAG]");
        assert_eq!(Value::new("FILE").variadic().to_string(), "<FILE>...");
        assert_eq!(Value::new("FILE").optional().variadic().len(), "[FILE]...".len());
    }
}
