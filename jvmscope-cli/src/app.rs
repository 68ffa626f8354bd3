use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// jvmscope - generate BCEL builder programs from compiled JVM classes
#[derive(Debug, Parser)]
#[command(name = "jvmscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directories searched for classes, separated like $CLASSPATH (default: $CLASSPATH or .).
    #[arg(long, global = true, value_name = "PATH")]
    pub classpath: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Write the Java program that rebuilds the class with BCEL.
    Generate {
        /// Qualified class name on the class path, or a path to a .class file.
        #[arg(value_name = "CLASS|FILE")]
        target: String,

        /// Write the program to this file instead of stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Suffix appended to the class name to name the generated program.
        #[arg(long, default_value = "Creator")]
        suffix: String,

        /// Do not generate a main method.
        #[arg(long)]
        no_main: bool,
    },

    /// Display the class header: name, superclass, source file, flags, interfaces, counts.
    Info {
        /// Qualified class name on the class path, or a path to a .class file.
        #[arg(value_name = "CLASS|FILE")]
        target: String,
    },

    /// List fields with decoded types and flags.
    Fields {
        /// Qualified class name on the class path, or a path to a .class file.
        #[arg(value_name = "CLASS|FILE")]
        target: String,
    },

    /// List methods with decoded signatures and flags.
    Methods {
        /// Qualified class name on the class path, or a path to a .class file.
        #[arg(value_name = "CLASS|FILE")]
        target: String,
    },

    /// Decode a field signature or method descriptor.
    Signature {
        /// Signature such as [[I or (ILjava/lang/String;)V.
        #[arg(value_name = "SIGNATURE", allow_hyphen_values = true)]
        signature: String,
    },
}
