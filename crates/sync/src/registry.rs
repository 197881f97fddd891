//! Static per-store profiles.
//!
//! Each storefront the sync serves carries compile-time data that never
//! changes between runs: the metafield table mapping supplier attribute
//! keys to Shopify metafield types, the range/subrange taxonomy behind
//! smart collections and the navigation menu, and the metafield
//! definition GIDs those collection rules match against.
//!
//! Profiles are resolved once at configuration load time; a store listed
//! in `STORES` without a profile here is a configuration error.

/// Shopify metafield value type a supplier attribute is encoded as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetafieldValueType {
    /// `single_line_text_field` - strings are trimmed, scalars stringified
    SingleLineText,
    /// `multi_line_text_field` - passed through unmodified
    MultiLineText,
    /// `boolean`
    Boolean,
    /// `number_integer`
    Integer,
    /// `number_decimal`
    Decimal,
    /// `json` - value is re-serialized as a JSON string
    Json,
}

impl MetafieldValueType {
    /// The Admin API type name for `MetafieldInput.type`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SingleLineText => "single_line_text_field",
            Self::MultiLineText => "multi_line_text_field",
            Self::Boolean => "boolean",
            Self::Integer => "number_integer",
            Self::Decimal => "number_decimal",
            Self::Json => "json",
        }
    }
}

/// One entry in a store's metafield table.
#[derive(Debug, Clone, Copy)]
pub struct MetafieldSpec {
    /// Supplier attribute key, also used as the metafield key
    pub key: &'static str,
    /// Target metafield type
    pub value_type: MetafieldValueType,
}

/// One top-level range in the store's navigation taxonomy.
#[derive(Debug, Clone, Copy)]
pub struct MenuRange {
    pub name: &'static str,
    pub subranges: &'static [&'static str],
}

/// Static data for one storefront.
#[derive(Debug)]
pub struct StoreProfile {
    /// Store name matching the `STORES` entry
    pub name: &'static str,
    /// Supplier attribute keys written as product metafields on creation
    pub metafields: &'static [MetafieldSpec],
    /// Range/subrange taxonomy driving collections and the store menu
    pub product_menu: &'static [MenuRange],
    /// Customer-facing collection titles, parallel to the flattened
    /// range/subrange pairs of `product_menu`; the collection-rename
    /// operation rewrites `{range}_{subrange}` titles to these
    pub collection_display_names: &'static [&'static str],
    /// Metafield definition GID collection rules match range names against
    pub range_definition_id: &'static str,
    /// Metafield definition GID collection rules match subrange names against
    pub subrange_definition_id: &'static str,
    /// Navigation menu title
    pub menu_title: &'static str,
    /// Navigation menu handle
    pub menu_handle: &'static str,
}

/// Look up the profile for a store name (case-insensitive).
#[must_use]
pub fn profile(name: &str) -> Option<&'static StoreProfile> {
    PROFILES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
        .copied()
}

static PROFILES: &[&StoreProfile] = &[&DIAMOND];

use MetafieldValueType::{Boolean, Decimal, Integer, Json, MultiLineText, SingleLineText};

const fn spec(key: &'static str, value_type: MetafieldValueType) -> MetafieldSpec {
    MetafieldSpec { key, value_type }
}

pub static DIAMOND: StoreProfile = StoreProfile {
    name: "DIAMOND",
    metafields: &[
        spec("description_plus", MultiLineText),
        spec("description_tech_spec", MultiLineText),
        spec("popup_info", SingleLineText),
        spec("best_category", SingleLineText),
        spec("is_old", Boolean),
        spec("is_new", Boolean),
        spec("is_good_deal", Boolean),
        spec("page_catalog_number", SingleLineText),
        spec("page_promo_number", SingleLineText),
        spec("restock_info", SingleLineText),
        spec("supplier_delivery_delay", Integer),
        spec("days_to_restock_avg", Integer),
        spec("length_mm", SingleLineText),
        spec("width_mm", SingleLineText),
        spec("height_mm", SingleLineText),
        spec("volume_m3", Decimal),
        spec("vapor", SingleLineText),
        spec("electric_power_kw", Decimal),
        spec("electric_connection", SingleLineText),
        spec("electric_connection_2", SingleLineText),
        spec("electric_power_c_neg", SingleLineText),
        spec("electric_power_c_pos", SingleLineText),
        spec("horse_power", SingleLineText),
        spec("kcal_power", Integer),
        spec("product_category_id", SingleLineText),
        spec("product_category_name", SingleLineText),
        spec("product_range_id", SingleLineText),
        spec("product_range_name", SingleLineText),
        spec("product_subrange_id", SingleLineText),
        spec("product_subrange_name", SingleLineText),
        spec("product_family_id", SingleLineText),
        spec("product_family_name", SingleLineText),
        spec("product_subfamily_id", SingleLineText),
        spec("product_subfamily_name", SingleLineText),
        spec("product_line_id", SingleLineText),
        spec("product_line_name", SingleLineText),
        spec("has_accessories", Integer),
        spec("product_type", Integer),
        spec("count_accessories", Integer),
        spec("brand", SingleLineText),
        spec("cusref", SingleLineText),
        spec("eancod", SingleLineText),
        spec("eprel", Json),
        spec("is_ups_ready", Integer),
        spec("product_tax", Decimal),
        spec("availability_DBE12", Integer),
    ],
    product_menu: &[
        MenuRange {
            name: "Kochgeräte",
            subranges: &[
                "Baeckereioefen",
                "Bain-marie",
                "BBQ Holzkohlegrill",
                "Chinaherde",
                "Dampfgarer",
                "Durchlauf Toaster",
                "Durchlauföfen",
                "Friteusen",
                "Gamma Drop In / Show Cooking",
                "Grillplatten",
                "Gyros Kebab Geraet",
                "Herd EL/GAS",
                "Hot-Dog Geräte",
                "Hähnchengrill",
                "INDUCTION-Platten",
                "Kochkessel & Kippbratpfanne",
                "Kochserie 900",
                "Kochserie 900+",
                "Kochserie MAXIMA 700+",
                "Kochserie Modular ALPHA 650",
                "Kochserie OPTIMA 1100",
                "Kochserie OPTIMA 700",
                "Kochserie 600",
                "Kochserie PRO 600",
                "Kochserie Snack 600",
                "Kombidämpfer Direkt",
                "Konvektionsöfen",
                "Lavastein-/Vaporgrill",
                "Mikrowellen",
                "Nudelkocher",
                "Ofen",
                "Panini Kontaktgrill",
                "Regenationsöfen",
                "Räuchergeräte",
                "Salamander",
                "Salzstationen",
                "Sous-vide Garer",
                "Speisenwarmhaltung",
                "Teppanyaki",
                "Toaster",
                "Toaster-Salamander",
                "Ultraschnelle Mikrowellenöfen",
                "Vapor Grill",
                "Waermeschrank",
                "Warme Vitrinen",
                "Wärmebrücken",
            ],
        },
        MenuRange {
            name: "Cook & Chill",
            subranges: &[
                "Hordenwagen",
                "Kombidämpfer",
                "Kombidämpfer Direkt",
                "Schockfroster/-kühler",
            ],
        },
        MenuRange {
            name: "Spülung",
            subranges: &[
                "Besteckpoliermaschinen",
                "Durchschubspülmaschine",
                "Durchschubspülmaschine Crossover",
                "Geschirrspülmaschinen",
                "Gläserspülmaschinen",
                "Kit Geschirrspüler & Spültisch",
                "Korbtransportsplmaschine",
                "Körbe & Zubehör",
                "Osmose Anlage",
                "Spuehlmaschinen/Glaeserspuehlmaschine",
                "Topfsp lmaschine",
                "Wasserenthaerter",
                "Zu- & Auslauftische",
                "Zubehör",
            ],
        },
        MenuRange {
            name: "Wäscherei",
            subranges: &[
                "Dampfbügelbrett/-eisen",
                "Lave-linges professionnels",
                "Mangel",
                "Rotationstrockner",
                "Schleudermaschinen",
                "Waschmaschine",
                "Waschturm",
                "Wäschetrockner",
            ],
        },
        MenuRange {
            name: "Kühlung",
            subranges: &[
                "Eiswürfelbereiter",
                "Flaschenkuehlschranke",
                "Gefriertruhen",
                "Getraenkedespender",
                "Granita- und Sorbet Despenser",
                "Kuehl/Gefrierkuehlzellen",
                "Kuehl/Gefrieschraenke",
                "Kuehlzellen +Kuehlaggregat",
                "Khl- und Gefriertische",
                "Kühlaufsatzvetrinen GN",
                "Lagerschraenke und Boxen",
                "Minibar-Kuehlschraenke",
                "Muellkuehler",
                "Reif & Gaerschrank",
                "Saladetten",
                "Schnellabkuehler/Kombischnellabkuehler",
                "Schnellabkuehlung",
                "Schockfroster/-kühler",
                "Selbstbedienungs-Gondeln",
                "Springbrunnen & Wasserkuehler",
                "Unterbaukuehler",
                "Vitrinen-Theken",
                "Vitrines T° positive & negative",
                "Wandkühlregale",
                "Weinschraenke",
            ],
        },
        MenuRange {
            name: "Ice cream",
            subranges: &[
                "Edelstahl-Behaelter fuer Eiscreme",
                "Eiscreme-Lagerung",
                "Eiscreme-Theken",
                "Eiscreme-Turbinen",
                "Kombi-Pasteurisierer-Turbinen",
                "Pasteurisiermaschine",
                "Sahne- Sosenkocher",
                "Sahnemaschine",
                "Vitrinen-Theken",
                "Waffelmaschinen",
            ],
        },
        MenuRange {
            name: "Konditorei - Bäckerei",
            subranges: &[
                "Baeckereioefen",
                "Edelstahl Möbel",
                "Gärkühlschränke",
                "Gärschraenke fuer Oefen",
                "Oefen und Baeckereioefen",
                "Ofen Drehbar",
                "Planetenruehrmixer",
                "Spiralteigknetmaschine - HEAVY DUTY",
                "Teigausrollmaschine",
            ],
        },
        MenuRange {
            name: "Pizza - Pasta",
            subranges: &[
                "Khl- und Gefriertische",
                "Durchlaufoefen",
                "Mozzarellaschneider",
                "Nudelmaschine",
                "Pizza-Former",
                "Pizzaoefen",
                "Spiralteigknetmaschine",
                "Teigausrollmaschine",
                "Teigportioniermaschine & Teigabrundmaschine",
                "Teigwalze",
                "Waermeplatten",
                "Warme Vitrinen",
                "Zubehoer / Pizza",
                "Zubehoer Pizzeria",
            ],
        },
        MenuRange {
            name: "Selfs-Service - Buffets",
            subranges: &[
                "Buffets",
                "Buffets / Salad Theken",
                "Inseln",
                "Kuehlvetrinen",
                "Modulare Self-service 700",
                "Modulare Self-service 800",
                "Salatbar Insel",
                "Self Drop In",
                "Self Drop In ARMONIA",
                "Tapas und Sushi-Vitrinen",
                "Wandkuehlregal",
                "Warme Vitrinen",
            ],
        },
        MenuRange {
            name: "Food & Bar",
            subranges: &["Modules de composition"],
        },
        MenuRange {
            name: "Wagen - GN Behalter",
            subranges: &[
                "Bain-marie Wagen",
                "Geschirrkorbwagen",
                "GN Behälter",
                "Mehl-/Zuckerwagen in Edelstahl",
                "Regalwagen",
                "Servierwagen Edelstahl",
                "Speisewagen gekühlt",
                "Spenderwagen",
                "Tellerhalter",
                "Universaltransportwagen",
                "Waermewagen",
                "Wagen neutral",
            ],
        },
        MenuRange {
            name: "Coffee bar - Tea room",
            subranges: &[
                "Crasheis",
                "Crepes Platte",
                "Croissant-Waermevetrine",
                "Frühstücksdienst",
                "Espresso-Kaffeemaschinen",
                "Getraenkedespender",
                "Kaffeemaschinen",
                "Kaffeemuehlen",
                "Mischer",
                "Mixer",
                "Profi-Zentrifugen",
                "Schokoladen-Sosen Waermer",
                "Sockel mit Kaffeesatzschublade",
                "Tassenwaermer",
                "Waffelmaschinen",
                "Warmwasserboiler",
                "Wasserenthaerter aus Edelstahl",
                "Vitrines T° positive & negative",
                "Zitruspresse",
            ],
        },
        MenuRange {
            name: "Dynamische Vorbereitung",
            subranges: &[
                "Aufschnittmaschine",
                "Cutter",
                "Cutter Horizontal",
                "Fleisch-Muerber",
                "Fleischmixmaschine",
                "Fleischwolf",
                "Fleischwolf Standgeraet",
                "Gekuehlte Fleischwolf",
                "Gemueseschneider",
                "Gemuesewaescher",
                "Hackblock & Hackbrett",
                "Hackmesser & Parmesan Kaesereibe",
                "Kartoffelschaeler",
                "Knochensaege",
                "Kuechenwaage",
                "Muschelreinigungsmaschine",
                "Parmesan-Reibe",
                "Planetenruehrmixer",
                "Stabmixer",
                "Sterilisator fuer Messer",
                "Vakuum-Beutel",
                "Vakuummaschine",
                "Verpackungsfolie",
                "Wurstfueller",
            ],
        },
        MenuRange {
            name: "Hospitality - Cleaning",
            subranges: &[
                "Chariots de salle",
                "Flambierwagen",
                "Frühstücksdienst",
                "Hand-& Haartrockner",
                "Kofferwagen",
                "Möbel für Ihre Ausstellung",
                "Postes de Nettoyage",
                "Rezeptionswagen",
                "Room Service",
                "Service-Wagen",
                "Speisenwaermer & Waermeplatte",
                "Wagen fuer Flaschen",
                "Wagen mit Untergestell",
                "Zimmer-Wagen",
            ],
        },
        MenuRange {
            name: "Reinigunsprodukte",
            subranges: &[
                "Edelstahlpflege",
                "Entkarbonierungsmittel",
                "Fettlöser",
                "Glanzspuehlmittel Spuelmaschinen",
                "Reinger fuer groben Schmutz",
                "Spuelmittelreiniger fuer Spuehlmaschinen",
                "Spuelmittelreiniger Oefen",
                "Spuelung Reiniger Oefen",
            ],
        },
        MenuRange {
            name: "STA. Vorbereitung - Hygiene",
            subranges: &[
                "Abfalleimer in Edelstahl",
                "Ablagetische",
                "Bodenablaufrinnen",
                "Chef Tisch",
                "Eckarbeitstische 90°",
                "Eckedelstahlschrank geschlossen",
                "Eckwandhaengeschraenke",
                "Edelstahlschrank",
                "Edelstahlspuelbecken",
                "Edelstahltische mit Grundboden",
                "Edelstahltische mit Schubladen",
                "Etagères Chef neutres",
                "Hand-& Haartrockner",
                "Handwaschbecken",
                "Insektenvernichter",
                "Kombiausgussbecken",
                "Lagerregale",
                "Lagerschraenke",
                "Muellbeutelhalter",
                "Neutrale & beheizte Chef-Regale",
                "Ozonbehandlung",
                "Papierdespenser",
                "Regale in Alluminium",
                "Spuelbecken mit Zwischenablage",
                "Tellerwärmer",
                "Vorbereitungskuehltische",
                "Wandkuehlregale",
                "Wandregale",
                "Wascharmaturen und Pendelbrausen",
                "Waschbecken geschlossen",
                "Wärmebrücken",
            ],
        },
        MenuRange {
            name: "Lüftung - Ventilation",
            subranges: &[
                "Absaugeinheit",
                "Absaugeinheiten mit separiertem Luftstrom",
                "Beleuchtungseinsats",
                "Drehzahlregler",
                "Eletrischer Schaltkasten",
                "Filternde Absaugeinheiten",
                "Wandhauben",
                "Wandhauben Kompensation",
                "Wandhauben mit Regler und Licht",
                "Zentralhauben",
                "Zentralhauben Kompensation",
            ],
        },
    ],
    collection_display_names: &[
        "Bäckereiöfen",
        "Bain-Marie",
        "BBQ Holzkohlegrill",
        "China-Herde",
        "Dampfgarer",
        "Durchlauf Toaster",
        "Durchlauföfen",
        "Friteusen",
        "Einbaugeräte",
        "Grillplatten",
        "Gyros-/Kebab-Grill",
        "Herd Elektro & Gas",
        "Hot-Dog-Geräte",
        "Hähnchengrill",
        "Induktionsplatten",
        "Kochkessel & Kippbratpfanne",
        "Kochserie 900",
        "Kochserie 900+",
        "Kochserie MAXIMA 700+",
        "Kochserie Modular ALPHA 650",
        "Kochserie OPTIMA 1100",
        "Kochserie OPTIMA 700",
        "Kochserie 600",
        "Kochserie PRO 600",
        "Kochserie Snack 600",
        "Kombidämpfer Direkt",
        "Konvektionsöfen",
        "Lavastein- & Vaporgrill",
        "Mikrowellen",
        "Nudelkocher",
        "Ofen",
        "Panini Kontaktgrill",
        "Regenerationsöfen",
        "Räuchergeräte",
        "Salamander",
        "Salzstationen",
        "Sous-vide Garer",
        "Speisen-Warmhaltung",
        "Teppanyaki",
        "Toaster",
        "Toaster-Salamander",
        "Ultraschnelle Mikrowellenöfen",
        "Vapor Grill",
        "Wärmeschrank",
        "Wärmevitrinen",
        "Wärmebrücken",
        "Hordenwagen",
        "Kombidämpfer",
        "Kombidämpfer Direkt",
        "Schockfroster/-kühler",
        "Besteckpoliermaschinen",
        "Durchschubspülmaschine",
        "Durchschubspülmaschine Crossover",
        "Geschirrspülmaschinen",
        "Gläserspülmaschinen",
        "Set: Geschirrspüler & Spültisch",
        "Korbtransportspülmaschine",
        "Körbe & Zubehör",
        "Osmose Anlage",
        "Spülmaschinen & Gläserspülmaschinen",
        "Topfspülmaschine",
        "Wasserenthärter",
        "Zu- und Auslauftische",
        "Zubehör",
        "Dampfbügelbrett/-eisen",
        "Gewerbewaschmaschinen",
        "Mangel",
        "Rotationstrockner",
        "Schleudermaschinen",
        "Waschmaschine",
        "Waschturm",
        "Wäschetrockner",
        "Eiswürfelbereiter",
        "Flaschenkühlschränke",
        "Gefriertruhen",
        "Getränkespender",
        "Granita- und Sorbetspender",
        "Kühl-/Gefrierzellen",
        "Kühl-/Gefrierschränke",
        "Kühlzellen + Kühlaggregat",
        "Kühl- und Gefriertische",
        "Kühlaufsatzvitrinen GN",
        "Lagerschränke und Boxen",
        "Minibarkühlschränke",
        "Müllkühler",
        "Reif- und Gärschrank",
        "Saladetten",
        "Schnellabkühler/Kombischnellabkühler",
        "Schnellabkühlung",
        "Schockfroster/-kühler",
        "Selbstbedienungsgondeln",
        "Springbrunnen & Wasserkühler",
        "Unterbaukühler",
        "Vitrinentheken",
        "Kühl- & Tiefkühlschränke",
        "Wandkühlregale",
        "Weinkühlschränke",
        "Edelstahlbehälter für Eiscreme",
        "Eiscreme-Lagerung",
        "Eistheken",
        "Eiscrememaschinen",
        "Kombi-Pasteurisierer",
        "Pasteurisiermaschine",
        "Sahne-/Soßenkocher",
        "Sahnemaschine",
        "Fleischtheken",
        "Waffelmaschinen",
        "Bäckereiöfen",
        "Edelstahlmöbel",
        "Gärkühlschränke",
        "Gärschränke für Öfen",
        "Öfen (inkl. Bäckereiöfen)",
        "Drehofen",
        "Planetenrührmixer",
        "Spiralteigknetmaschine (Heavy Duty)",
        "Teigausrollmaschine",
        "Kühl- und Gefriertische",
        "Durchlauföfen",
        "Mozzarellaschneider",
        "Nudelmaschine",
        "Pizza-Former",
        "Pizzaöfen",
        "Spiralteigknetmaschine",
        "Teigausrollmaschine",
        "Teigportionier- & Abrundmaschine",
        "Teigwalzen",
        "Wärmeplatten",
        "Warme Vitrinen",
        "Zubehör / Pizza",
        "Zubehör Pizzeria",
        "Buffets",
        "Buffets/Salattheken",
        "Inseln",
        "Kühlvitrinen",
        "Modulares Self-Service 700",
        "Modulares Self-Service 800",
        "Salatbar-Inseln",
        "Self-Service Drop-In",
        "Self-Service Drop-In Armonia",
        "Tapas- & Sushi-Vitrinen",
        "Wandkühlregale",
        "Warme Vitrinen",
        "Module zur Zusammenstellung",
        "Bain-marie-Wagen",
        "Geschirrkorbwagen",
        "GN-Behälter",
        "Mehl-/Zuckerwagen Edelstahl",
        "Regalwagen",
        "Servierwagen Edelstahl",
        "Speisewagen gekühlt",
        "Spenderwagen",
        "Tellerhalter",
        "Universaltransportwagen",
        "Wärmewagen",
        "Neutrale Wagen",
        "Crusheisbereiter",
        "Crêpes-Platten",
        "Croissant-Wärmevitrine",
        "Frühstücksservice",
        "Espresso-Kaffeemaschinen",
        "Getränkespender",
        "Kaffeemaschinen",
        "Kaffeemühlen",
        "Mischer",
        "Mixer",
        "Profi-Zentrifugen",
        "Schokoladensoßen-Wärmer",
        "Sockel mit Kaffeesatzschublade",
        "Tassenwärmer",
        "Waffelmaschinen",
        "Warmwasserboiler",
        "Wasserenthärter (Edelstahl)",
        "Kühl- und Tiefkühlschränke",
        "Zitruspresse",
        "Aufschnittmaschine",
        "Cutter",
        "Horizontal-Cutter",
        "Fleischmürber",
        "Fleischmischmaschinen",
        "Fleischwölfe",
        "Fleischwolf Standgerät",
        "Gekühlte Fleischwölfe",
        "Gemüseschneider",
        "Gemüsereiniger/-wäscher",
        "Hackblock & Hackbrett",
        "Hackmesser & Parmesanreibe",
        "Kartoffelschäler",
        "Knochensäge",
        "Küchenwaagen",
        "Muschelreinigungsmaschinen",
        "Parmesanreibe",
        "Planetenrührmixer",
        "Stabmixer",
        "Messersterilisatoren",
        "Vakuumbeutel",
        "Vakuummaschinen",
        "Verpackungsfolie",
        "Wurstfüller",
        "Raum- und Servierwagen",
        "Flambierwagen",
        "Frühstücksservice",
        "Hand- & Haartrockner",
        "Kofferwagen",
        "Ausstellungsmöbel",
        "Reinigungsstationen",
        "Rezeptionswagen",
        "Room Service",
        "Servicewagen",
        "Speisenwärmer & Wärmeplatten",
        "Flaschenwagen",
        "Wagen mit Untergestell",
        "Zimmerwagen",
        "Edelstahlpflege",
        "Entkalker",
        "Fettlöser",
        "Glanzspülmittel für Spülmaschinen",
        "Reiniger für starken Schmutz",
        "Spülmittelreiniger für Spülmaschinen",
        "Spülmittelreiniger Öfen",
        "Spülreiniger für Öfen",
        "Abfalleimer Edelstahl",
        "Ablagetische",
        "Bodenablaufrinnen",
        "Chef-Tisch",
        "Eckarbeitstische 90°",
        "Eckedelstahlschrank geschlossen",
        "Eckhängeschränke Edelstahl",
        "Edelstahlschrank",
        "Edelstahlspülbecken",
        "Edelstahltische mit Grundboden",
        "Edelstahltische mit Schubladen",
        "Neutrale Chef-Etageren",
        "Hand- & Haartrockner",
        "Handwaschbecken",
        "Insektenvernichter",
        "Kombiausgussbecken",
        "Lagerregale",
        "Lagerschränke",
        "Müllbeutelhalter",
        "Neutrale & beheizte Chef-Regale",
        "Ozonbehandlung",
        "Papierdispenser",
        "Aluminiumregale",
        "Spülbecken mit Ablage",
        "Tellerwärmer",
        "Vorbereitungskühltische",
        "Wandkühlregale",
        "Wandregale",
        "Wascharmaturen & Pendelbrausen",
        "Geschlossene Waschbecken",
        "Wärmebrücken",
        "Absaugeinheit",
        "Absaugeinheiten mit separatem Luftstrom",
        "Beleuchtungseinsatz",
        "Drehzahlregler",
        "Elektrischer Schaltkasten",
        "Filternde Absaugeinheiten",
        "Wandhauben",
        "Wandhauben mit Kompensation",
        "Wandhauben mit Regler und Licht",
        "Zentralhauben",
        "Zentralhauben mit Kompensation",
    ],
    range_definition_id: "gid://shopify/MetafieldDefinition/288024002892",
    subrange_definition_id: "gid://shopify/MetafieldDefinition/288024068428",
    menu_title: "Produkte",
    menu_handle: "produkte",
};
