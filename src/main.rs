use clap::{App, AppSettings, Arg, SubCommand};
use log::info;

use genealogy_blocks::config::Config;
use genealogy_blocks::error::Error;
use genealogy_blocks::{auth, db, records, trees, web};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{}: {:?}", err, err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let matches = App::new("genealogy-blocks")
        .about("Family tree home pages with favorites and news")
        .setting(AppSettings::VersionlessSubcommands)
        .arg(
            Arg::with_name("settings")
                .long("settings")
                .value_name("FILE")
                .help("Settings file, without extension")
                .default_value("settings"),
        )
        .subcommand(SubCommand::with_name("serve").about("Runs the web server (default)"))
        .subcommand(
            SubCommand::with_name("create-tree")
                .about("Creates an empty family tree")
                .arg(Arg::with_name("name").required(true))
                .arg(Arg::with_name("title").required(true)),
        )
        .subcommand(
            SubCommand::with_name("create-user")
                .about("Creates a user account")
                .arg(Arg::with_name("name").required(true))
                .arg(Arg::with_name("real-name").long("real-name").takes_value(true))
                .arg(
                    Arg::with_name("admin")
                        .long("admin")
                        .help("Makes the user a site administrator"),
                ),
        )
        .subcommand(
            SubCommand::with_name("add-record")
                .about("Adds or replaces a record in a family tree")
                .arg(Arg::with_name("tree").required(true))
                .arg(Arg::with_name("xref").required(true))
                .arg(Arg::with_name("type").required(true))
                .arg(Arg::with_name("name").required(true))
                .arg(
                    Arg::with_name("restricted")
                        .long("restricted")
                        .help("Hides the record from favorites"),
                ),
        )
        .subcommand(
            SubCommand::with_name("grant-manager")
                .about("Lets a user manage a family tree")
                .arg(Arg::with_name("user").required(true))
                .arg(Arg::with_name("tree").required(true)),
        )
        .get_matches();

    let config = Config::load(matches.value_of("settings").unwrap_or("settings"))?;
    let conn = db::connect(&config.db_path)?;
    db::initialise(&conn)?;

    match matches.subcommand() {
        ("create-tree", Some(args)) => {
            trees::create_tree(
                &conn,
                args.value_of("name").unwrap_or_default(),
                args.value_of("title").unwrap_or_default(),
            )?;
        }
        ("create-user", Some(args)) => {
            auth::create_user(
                &conn,
                args.value_of("name").unwrap_or_default(),
                args.value_of("real-name").unwrap_or_default(),
                args.is_present("admin"),
            )?;
        }
        ("add-record", Some(args)) => {
            records::add_record(
                &conn,
                args.value_of("tree").unwrap_or_default(),
                args.value_of("xref").unwrap_or_default(),
                args.value_of("type").unwrap_or_default(),
                args.value_of("name").unwrap_or_default(),
                args.is_present("restricted"),
            )?;
        }
        ("grant-manager", Some(args)) => {
            let name = args.value_of("user").unwrap_or_default();
            let user = auth::find_user(&conn, name)?
                .ok_or_else(|| Error::UserNotFound(name.to_owned()))?;
            let tree = trees::find_tree(&conn, args.value_of("tree").unwrap_or_default())?;
            auth::grant_manager(&conn, &user, &tree)?;
        }
        _ => {
            drop(conn);
            let addr = config.listen_address();
            info!("Listening on http://{}", addr);
            gotham::start(addr, web::router(config));
        }
    }
    Ok(())
}
