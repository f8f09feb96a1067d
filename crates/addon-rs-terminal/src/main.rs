use std::io::Write;

use addon_rs::cart::OperationKind;
use addon_rs::catalog::AddonCatalog;
use addon_rs::catalog::HttpCatalog;
use addon_rs::manager::PageKind;

type Manager = addon_rs::AddonManager<HttpCatalog>;

#[tokio::main]
async fn main() {
	env_logger::init();

	let mut opts;

	/* Parse console input */
	let parsed_options = {
		let args: Vec<String> = std::env::args().collect();

		opts = getopts::Options::new();
		opts.optflag( "h", "help",    "Show help");
		opts.optflag( "d", "dev",     "Use the development catalog");
		opts.optopt(  "m", "modules", "JSON file listing the host's modules", "FILE");
		opts.optopt(  "c", "catalog", "Catalog endpoint override", "URL");
		opts.parsing_style(getopts::ParsingStyle::FloatingFrees);

		let parsed_options = match opts.parse(&args[1..]) {
			Ok(m)  => { m }
			Err(e) => { println!("Unable to parse options: {}", e); return }
		};

		if parsed_options.opt_present("h") {
			eprintln!("{}", opts.usage("Usage: addon-rs-terminal [options] list|search|install|remove|status|fetch"));
			return;
		}

		parsed_options
	};

	let mut options = addon_rs::AddonRsOptions::default();
	options.set_dev_mode(parsed_options.opt_present("d"));
	options.set_catalog_url(parsed_options.opt_str("c"));

	let registry = match load_registry(parsed_options.opt_str("m")) {
		Ok(registry) => registry,
		Err(e) => { log::error!("Failed to read host modules: {}", e); return },
	};

	let catalog = match HttpCatalog::from_options(&options) {
		Ok(catalog) => catalog,
		Err(e) => { log::error!("Failed to create catalog client: {}", e); return },
	};

	let mut manager = match addon_rs::AddonManager::new(options, catalog, registry) {
		Ok(manager) => manager,
		Err(e) => { log::error!("Failed to start the addon manager: {}", e); return },
	};

	if parsed_options.free.is_empty() {
		eprintln!("No command given, try --help.");
		return;
	}

	let result = match parsed_options.free.get(0).unwrap().as_str() {
		"list" => list_addons(&mut manager),
		"search" => search_addons(&mut manager, &parsed_options.free[1..]),
		"install" => queue_operations(&mut manager, &parsed_options.free[1..], OperationKind::Install),
		"remove" => queue_operations(&mut manager, &parsed_options.free[1..], OperationKind::Remove),
		"status" => show_status(&manager),
		"fetch" => fetch_pending(&manager).await,
		command => { log::error!("Unknown command: {}", command); return },
	};

	if let Err(e) = result {
		log::error!("Command failed: {}", e);
	}
}

fn load_registry(modules_file: Option<String>) -> Result<addon_rs::InstalledRegistry, Error> {
	let descriptors: Vec<addon_rs::registry::HostModuleDescriptor> = match modules_file {
		Some(path) => {
			let data = std::fs::read_to_string(path).map_err(addon_rs::Error::from)?;
			serde_json::from_str(&data).map_err(addon_rs::Error::from)?
		},
		None => {
			log::warn!("No host modules file given, starting with an empty registry.");
			vec![]
		},
	};
	Ok(addon_rs::InstalledRegistry::from_host(descriptors))
}

fn print_item(manager: &Manager, item: &addon_rs::AddonItem) {
	let version = item.version.as_ref().map(|v| v.to_string()).unwrap_or_else(|| "?".to_string());
	let kind = if item.is_addon { "addon" } else { "core" };

	let mut markers = Vec::<String>::new();
	if let Some(available) = manager.updates().available_version(&item.id) {
		if item.update_available {
			markers.push(format!("update available: {}", available));
		}
	}
	if manager.is_item_removed(&item.id) {
		markers.push("pending removal".to_string());
	} else if manager.changeset().is_module_installed(&item.id) {
		markers.push("pending install".to_string());
	}

	if markers.is_empty() {
		println!("\t{} {} ({})", item.id, version, kind);
	} else {
		println!("\t{} {} ({}) [{}]", item.id, version, kind, markers.join(", "));
	}
}

fn list_addons(manager: &mut Manager) -> Result<(), Error> {
	if let Err(e) = manager.refresh_updates() {
		log::warn!("Could not reach the catalog for update info: {}", e);
	}

	manager.set_page(PageKind::Installed);
	println!("Installed modules:");
	for index in 0..manager.items_count() {
		let item = manager.item(index).expect("listing changed mid-iteration");
		print_item(manager, item);
	}
	Ok(())
}

fn search_addons(manager: &mut Manager, args: &[String]) -> Result<(), Error> {
	let text = args.first().ok_or(Error::MissingArgument)?;

	let mut found = 0;
	manager.set_search(text.clone(), |m| {
		found = m.items_count();
		println!("Catalog addons matching \"{}\":", text);
		for index in 0..m.items_count() {
			print_item(m, m.item(index).expect("listing changed mid-iteration"));
		}
	})?;

	if found == 0 {
		println!("\tNo matches.");
	}
	Ok(())
}

fn queue_operations(manager: &mut Manager, ids: &[String], kind: OperationKind) -> Result<(), Error> {
	if ids.is_empty() {
		return Err(Error::MissingArgument);
	}

	for id in ids {
		let item = match kind {
			OperationKind::Remove => manager.registry().get_by_id(id).cloned(),
			_ => {
				let results = manager.catalog().search_for_addons(id).map_err(addon_rs::Error::from)?;
				results.into_iter().find(|addon| &addon.id == id)
			},
		};

		let item = match item {
			Some(item) => item,
			None => { log::error!("No such addon: {}", id); continue },
		};

		match manager.add_to_cart(item, kind) {
			Ok(()) => {},
			Err(addon_rs::Error::DuplicateOperation { id, .. }) => {
				log::warn!("{} is already staged, skipping.", id);
			},
			Err(e) => return Err(Error::AddonRs(e)),
		}
	}

	if manager.cart().is_empty() {
		println!("Nothing staged.");
		return Ok(());
	}

	println!("Staged operations:");
	for entry in manager.cart().entries() {
		println!("\t{:?} {}", entry.kind, entry.item.id);
	}

	let stdin = std::io::stdin();
	print!("Commit changes? [(y)/n] ");
	let _ = std::io::stdout().flush();
	loop {
		let mut input = String::new();
		let _ = stdin.read_line(&mut input);
		let input = input.trim().to_lowercase();
		if input == "y" || input.is_empty() {
			break;
		} else if input == "n" {
			manager.cancel_cart();
			return Err(Error::UserCancelled);
		} else {
			println!("\nInput invalid.")
		}
	}

	let summary = manager.commit_cart()?;
	println!("Committed {} installs and {} removes.", summary.installs, summary.removes);
	Ok(())
}

fn show_status(manager: &Manager) -> Result<(), Error> {
	let changeset = manager.changeset();
	if changeset.is_empty() {
		println!("No pending operations.");
		return Ok(());
	}

	println!("Pending installs:");
	for id in changeset.pending_installs() {
		println!("\t{}", id);
	}
	println!("Pending removals:");
	for id in changeset.pending_removes() {
		println!("\t{}", id);
	}
	Ok(())
}

async fn fetch_pending(manager: &Manager) -> Result<(), Error> {
	use addon_rs::catalog::downloads;

	let ids: Vec<String> = manager.changeset().pending_installs().map(str::to_string).collect();
	if ids.is_empty() {
		println!("Nothing pending to fetch.");
		return Ok(());
	}

	let mut requests = Vec::<downloads::DownloadRequest>::new();
	for id in &ids {
		let filename = manager.catalog().get_addon_file(id).map_err(addon_rs::Error::from)?;
		requests.push(downloads::DownloadRequest {
			module_id: id.clone(),
			url: manager.catalog().file_url(&filename),
			filename,
		});
	}

	let client = reqwest::Client::builder()
		.https_only(manager.options().https_only())
		.build()?;

	let results = downloads::download_addon_files(manager.options(), &client, &requests, false).await;
	for (id, result) in &results {
		match result {
			Ok(path) => println!("Fetched {} to {}", id, path.display()),
			Err(e) => log::error!("Failed to fetch addon file for {}: {}", id, e),
		}
	}

	if results.iter().any(|(_, result)| result.is_err()) {
		return Err(Error::Download);
	}
	Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("addon-rs error: {0}")]
	AddonRs(#[from] addon_rs::Error),
	#[error("reqwest error: {0}")]
	Reqwest(#[from] reqwest::Error),
	#[error("missing argument")]
	MissingArgument,
	#[error("download failed")]
	Download,
	#[error("user cancelled an action")]
	UserCancelled,
}
