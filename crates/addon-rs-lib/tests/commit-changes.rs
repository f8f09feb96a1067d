#[test]
fn commit_changes() {
	use addon_rs::cart::OperationKind;
	use addon_rs::catalog::AddonCatalog;
	use addon_rs::changeset::ChangeSet;
	use addon_rs::manager::AddonManager;
	use addon_rs::registry::InstalledRegistry;

	let (_guard, options) = addon_rs_test_utils::temp_options();

	let registry = InstalledRegistry::from_host(vec![addon_rs_test_utils::host_module("core", "2.0")]);
	let mut catalog = addon_rs_test_utils::FakeCatalog::new();
	catalog.addons.push(addon_rs_test_utils::catalog_item("addonX", "1.0"));

	let mut manager = AddonManager::new(options, catalog, registry).unwrap();
	assert!(manager.changeset().is_empty());
	assert!(manager.cart().is_empty());

	let addon = manager.catalog().search_for_addons("addonX").unwrap().remove(0);
	manager.add_to_cart(addon, OperationKind::Install).unwrap();
	assert!(manager.is_in_cart("addonX", OperationKind::Install));
	assert!(manager.is_item_pending("addonX"));
	assert!(!manager.is_item_installed("addonX"));

	let summary = manager.commit_cart().unwrap();
	assert_eq!(summary.installs, 1);
	assert_eq!(summary.removes, 0);
	assert!(manager.cart().is_empty());
	assert!(manager.changeset().is_module_installed("addonX"));
	assert!(manager.is_item_installed("addonX"));
	assert!(manager.is_item_installed("core"));

	/* The committed set must survive a restart. */
	let reloaded = ChangeSet::load_from_disk(manager.options()).unwrap();
	assert!(reloaded.is_module_installed("addonX"));
}
